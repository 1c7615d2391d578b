pub mod error;
pub mod lazy;
pub mod operator;
pub mod query;

use std::ops::{Bound, RangeBounds};

pub use error::{Error, Result};
pub use lazy::LazySegTree;

/// 長さ`len`の列に対する区間を半開区間`[l, r)`に変換する。
///
/// 戻り値を`(l, r)`とすると以下が保証される。
///
/// * `l <= r <= len`
fn get_lr(len: usize, range: impl RangeBounds<usize>) -> Result<(usize, usize)> {
    let l = match range.start_bound() {
        Bound::Excluded(s) => s.checked_add(1).ok_or(Error::RangeOverflow)?,
        Bound::Included(s) => *s,
        Bound::Unbounded => 0,
    };
    let r = match range.end_bound() {
        Bound::Excluded(e) => *e,
        Bound::Included(e) => e.checked_add(1).ok_or(Error::RangeOverflow)?,
        Bound::Unbounded => len,
    };
    if l > r {
        Err(Error::InvalidRange { start: l, end: r })
    } else if r > len {
        Err(Error::RangeEndOutOfRange { end: r, len })
    } else {
        Ok((l, r))
    }
}

#[cfg(test)]
mod tests {
    use std::ops::Bound;

    use super::*;

    #[test]
    fn get_lr_test() {
        assert_eq!(get_lr(7, ..), Ok((0, 7)));
        assert_eq!(get_lr(7, 3..), Ok((3, 7)));
        assert_eq!(get_lr(7, ..=2), Ok((0, 3)));
        assert_eq!(get_lr(7, 2..5), Ok((2, 5)));
        assert_eq!(get_lr(7, 7..7), Ok((7, 7)));
        assert_eq!(get_lr(0, ..), Ok((0, 0)));
        assert_eq!(
            get_lr(7, (Bound::Excluded(1), Bound::Included(4))),
            Ok((2, 5))
        );
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn get_lr_error_test() {
        assert_eq!(
            get_lr(7, 0..9),
            Err(Error::RangeEndOutOfRange { end: 9, len: 7 })
        );
        assert_eq!(
            get_lr(7, 0..=7),
            Err(Error::RangeEndOutOfRange { end: 8, len: 7 })
        );
        assert_eq!(
            get_lr(7, 9..),
            Err(Error::InvalidRange { start: 9, end: 7 })
        );
        assert_eq!(
            get_lr(7, 5..4),
            Err(Error::InvalidRange { start: 5, end: 4 })
        );
        assert_eq!(get_lr(7, ..=usize::MAX), Err(Error::RangeOverflow));
        assert_eq!(
            get_lr(7, (Bound::Excluded(usize::MAX), Bound::Unbounded)),
            Err(Error::RangeOverflow)
        );
    }
}
