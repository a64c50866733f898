// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// A one-line conditional expression.  `cq!(col == 0, 0, col - 1)`
/// reads better than a four-line `if` once rustfmt is done with it,
/// and only the chosen arm is evaluated, so the arm that would
/// underflow at the border is never computed.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn only_the_chosen_arm_runs() {
        let col: usize = 0;
        assert_eq!(cq!(col == 0, 0, col - 1), 0);
        let col: usize = 4;
        assert_eq!(cq!(col == 0, 0, col - 1), 3);
    }
}
