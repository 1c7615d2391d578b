use thiserror::Error;

/// 遅延セグメント木の操作が失敗した理由。
///
/// どのエラーも木を変更する前に検出されるため、エラーが返った時点で木の状態は呼び出し前と同じである。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("index {index} out of range for segment tree of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("range starts at {start} but ends at {end}")]
    InvalidRange { start: usize, end: usize },
    #[error("range end index {end} out of range for segment tree of length {len}")]
    RangeEndOutOfRange { end: usize, len: usize },
    #[error("range bound overflows usize")]
    RangeOverflow,
    #[error("predicate must hold for the identity element")]
    IdentityRejected,
}

pub type Result<T> = std::result::Result<T, Error>;
