use std::{cmp::Ordering, ops::Add};

use self::ident::{HasAddIdent, HasMax, HasMin};

pub mod ident;

/// セグメント木に載せるモノイド。
///
/// `query`は結合的で、`ident()`はその単位元でなければならない。
/// これは実行時には検査されず、満たさない場合は結果が意味のない値になる。
pub trait Query<T> {
    fn ident(&self) -> T;
    fn query(&self, x: &T, y: &T) -> T;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MinQuery;

impl<T: Ord + HasMax + Clone> Query<T> for MinQuery {
    fn ident(&self) -> T {
        T::MAX
    }
    fn query(&self, x: &T, y: &T) -> T {
        match x.cmp(y) {
            Ordering::Less => x.clone(),
            _ => y.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MaxQuery;

impl<T: Ord + HasMin + Clone> Query<T> for MaxQuery {
    fn ident(&self) -> T {
        T::MIN
    }
    fn query(&self, x: &T, y: &T) -> T {
        match x.cmp(y) {
            Ordering::Less => y.clone(),
            _ => x.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SumQuery;

impl<T: Add<Output = T> + HasAddIdent + Clone> Query<T> for SumQuery {
    fn ident(&self) -> T {
        T::IDENT
    }
    fn query(&self, x: &T, y: &T) -> T {
        x.clone() + y.clone()
    }
}

/// 値とその値が表す要素数の組。
///
/// 区間加算のように作用の結果が区間の長さに依存する場合、要素数を一緒に持たせることで
/// 作用を`(値, 要素数)`だけから計算できるようにする。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Counted<T> {
    pub value: T,
    pub len: usize,
}

impl<T> Counted<T> {
    /// 1要素分の値を作る。
    pub const fn new(value: T) -> Self {
        Self { value, len: 1 }
    }
}

impl<T: Add<Output = T>> Add for Counted<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value + rhs.value,
            len: self.len + rhs.len,
        }
    }
}

impl<T: HasAddIdent> HasAddIdent for Counted<T> {
    const IDENT: Self = Self {
        value: T::IDENT,
        len: 0,
    };
}

/// 任意の二項演算と単位元からなるモノイド。
#[derive(Clone, Copy, Debug)]
pub struct FnQuery<F, T> {
    op: F,
    ident: T,
}

impl<F, T> FnQuery<F, T>
where
    F: Fn(&T, &T) -> T,
{
    pub fn new(op: F, ident: T) -> Self {
        Self { op, ident }
    }
}

impl<F, T> Query<T> for FnQuery<F, T>
where
    F: Fn(&T, &T) -> T,
    T: Clone,
{
    fn ident(&self) -> T {
        self.ident.clone()
    }
    fn query(&self, x: &T, y: &T) -> T {
        (self.op)(x, y)
    }
}
