use std::ops::Add;

use crate::query::{
    ident::{HasAddIdent, Times},
    Counted, MaxQuery, MinQuery, Query, SumQuery,
};

/// モノイド`Q`の要素`T`に左から作用する作用素`U`のモノイド。
///
/// 以下を満たさなければならない。これらは実行時には検査されない。
///
/// * `apply(&ident(), x) == x`
/// * `apply(&composite(f, g), x) == apply(f, &apply(g, x))`
/// * `apply(f, query(x, y)) == query(apply(f, x), apply(f, y))`
pub trait LeftOperator<Q, T, U>
where
    Q: Query<T>,
{
    fn ident(&self) -> U;

    /// `g`を作用させた後に`f`を作用させる作用素を返す。
    fn composite(&self, f: &U, g: &U) -> U;

    /// `x`に`f`を作用させた結果を返す。
    ///
    /// # Note
    /// `x`はある`x_1, x_2, ..., x_n`について、`query(x_1, query(x_2, ..., query(x_{n-1}, x_n)))`の結果であり、
    /// この関数は`query(apply(f, x_1), query(apply(f, x_2), ..., query(apply(f, x_{n-1}), apply(f, x_n))))`を返すべきであることに注意する。
    fn apply(&self, f: &U, x: &T) -> T;

    /// `f`が単位元であることが分かる場合に`true`を返す。
    ///
    /// `false`を返しても正しさには影響しない。単位元の伝搬を省略できなくなるだけである。
    fn is_ident(&self, _f: &U) -> bool {
        false
    }
}

/// 区間に定数を加算する作用。
#[derive(Clone, Copy, Debug, Default)]
pub struct AddOperator;

macro_rules! impl_add_operator_for_order_query {
    ($($q:ty),* $(,)?) => {
        $(impl<T> LeftOperator<$q, T, T> for AddOperator
        where
            $q: Query<T>,
            T: Clone + Add<Output = T> + HasAddIdent + PartialEq,
        {
            fn ident(&self) -> T {
                T::IDENT
            }
            fn composite(&self, f: &T, g: &T) -> T {
                f.clone() + g.clone()
            }
            fn apply(&self, f: &T, x: &T) -> T {
                x.clone() + f.clone()
            }
            fn is_ident(&self, f: &T) -> bool {
                *f == T::IDENT
            }
        })*
    };
}

impl_add_operator_for_order_query!(MinQuery, MaxQuery);

impl<T> LeftOperator<SumQuery, Counted<T>, T> for AddOperator
where
    SumQuery: Query<Counted<T>>,
    T: Clone + Times + Add<Output = T> + HasAddIdent + PartialEq,
{
    fn ident(&self) -> T {
        T::IDENT
    }
    fn composite(&self, f: &T, g: &T) -> T {
        f.clone() + g.clone()
    }
    fn apply(&self, f: &T, x: &Counted<T>) -> Counted<T> {
        Counted {
            value: x.value.add_times(f, x.len),
            len: x.len,
        }
    }
    fn is_ident(&self, f: &T) -> bool {
        *f == T::IDENT
    }
}

/// 区間を一つの値で上書きする作用。`None`が単位元。
#[derive(Clone, Copy, Debug, Default)]
pub struct Update;

macro_rules! impl_update_for_order_query {
    ($($q:ty),* $(,)?) => {
        $(impl<T> LeftOperator<$q, T, Option<T>> for Update
        where
            $q: Query<T>,
            T: Clone,
        {
            fn ident(&self) -> Option<T> {
                None
            }
            fn composite(&self, f: &Option<T>, g: &Option<T>) -> Option<T> {
                f.as_ref().or(g.as_ref()).cloned()
            }
            fn apply(&self, f: &Option<T>, x: &T) -> T {
                match f {
                    Some(f) => f.clone(),
                    None => x.clone(),
                }
            }
            fn is_ident(&self, f: &Option<T>) -> bool {
                f.is_none()
            }
        })*
    };
}

impl_update_for_order_query!(MinQuery, MaxQuery);

impl<T> LeftOperator<SumQuery, Counted<T>, Option<T>> for Update
where
    SumQuery: Query<Counted<T>>,
    T: Clone + Times,
{
    fn ident(&self) -> Option<T> {
        None
    }
    fn composite(&self, f: &Option<T>, g: &Option<T>) -> Option<T> {
        f.as_ref().or(g.as_ref()).cloned()
    }
    fn apply(&self, f: &Option<T>, x: &Counted<T>) -> Counted<T> {
        match f {
            Some(f) => Counted {
                value: f.times(x.len),
                len: x.len,
            },
            None => x.clone(),
        }
    }
    fn is_ident(&self, f: &Option<T>) -> bool {
        f.is_none()
    }
}

/// 任意の合成・作用の関数と単位元からなる作用。
///
/// `composite(f, g)`は`g`の後に`f`を作用させる作用素、`apply(f, x)`は`x`に`f`を作用させた値を返す関数とする。
#[derive(Clone, Copy, Debug)]
pub struct FnOperator<C, A, U> {
    composite: C,
    apply: A,
    ident: U,
}

impl<C, A, U> FnOperator<C, A, U> {
    pub fn new(composite: C, apply: A, ident: U) -> Self {
        Self {
            composite,
            apply,
            ident,
        }
    }
}

impl<Q, T, U, C, A> LeftOperator<Q, T, U> for FnOperator<C, A, U>
where
    Q: Query<T>,
    U: Clone + PartialEq,
    C: Fn(&U, &U) -> U,
    A: Fn(&U, &T) -> T,
{
    fn ident(&self) -> U {
        self.ident.clone()
    }
    fn composite(&self, f: &U, g: &U) -> U {
        (self.composite)(f, g)
    }
    fn apply(&self, f: &U, x: &T) -> T {
        (self.apply)(f, x)
    }
    fn is_ident(&self, f: &U) -> bool {
        *f == self.ident
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_operator() {
        let op = AddOperator;
        let f = LeftOperator::<MinQuery, i32, i32>::composite(&op, &3, &-5);
        assert_eq!(f, -2);
        assert_eq!(LeftOperator::<MinQuery, i32, i32>::apply(&op, &f, &10), 8);
        assert!(LeftOperator::<MaxQuery, i32, i32>::is_ident(&op, &0));

        let x = Counted { value: 10u64, len: 4 };
        assert_eq!(
            LeftOperator::<SumQuery, _, u64>::apply(&op, &3, &x),
            Counted { value: 22, len: 4 }
        );
    }

    #[test]
    fn test_add_operator_narrow_type() {
        let op = AddOperator;
        // 要素数 128 は i8 に収まらないが、作用後の和 64 は収まる
        let x = Counted { value: -64i8, len: 128 };
        assert_eq!(
            LeftOperator::<SumQuery, _, i8>::apply(&op, &1, &x),
            Counted { value: 64, len: 128 }
        );
        let x = Counted { value: 5u8, len: 1000 };
        assert_eq!(
            LeftOperator::<SumQuery, _, u8>::apply(&op, &0, &x),
            Counted { value: 5, len: 1000 }
        );

        let mut segtree = (0..200)
            .map(|i| Counted::new(if i % 2 == 0 { -1i8 } else { 0 }))
            .collect::<crate::LazySegTree<SumQuery, AddOperator, _, i8>>();
        assert_eq!(segtree.all_prod().value, -100);
        segtree.apply_range(.., 1).unwrap();
        assert_eq!(segtree.all_prod().value, 100);
        assert_eq!(segtree.prod(..128).unwrap().value, 64);
        assert_eq!(segtree.prod(..199).unwrap().value, 99);
        assert_eq!(segtree.get(0).unwrap().value, 0);
        assert_eq!(segtree.get(199).unwrap().value, 1);
    }

    #[test]
    fn test_update() {
        let op = Update;
        let f = LeftOperator::<MaxQuery, i32, _>::composite(&op, &Some(1), &Some(2));
        assert_eq!(f, Some(1));
        let f = LeftOperator::<MaxQuery, i32, _>::composite(&op, &None, &Some(2));
        assert_eq!(f, Some(2));
        assert_eq!(LeftOperator::<MaxQuery, i32, _>::apply(&op, &None, &5), 5);
        assert_eq!(LeftOperator::<MaxQuery, i32, _>::apply(&op, &Some(7), &5), 7);

        let x = Counted { value: 10i64, len: 3 };
        assert_eq!(
            LeftOperator::<SumQuery, _, _>::apply(&op, &Some(-2i64), &x),
            Counted { value: -6, len: 3 }
        );
    }

    #[test]
    fn test_fn_operator() {
        // 一次関数 x -> a * x + b の合成は非可換
        let op = FnOperator::new(
            |f: &(i64, i64), g: &(i64, i64)| (f.0 * g.0, f.0 * g.1 + f.1),
            |f: &(i64, i64), x: &i64| f.0 * x + f.1,
            (1, 0),
        );
        let f = (2, 3);
        let g = (5, 7);
        let fg = LeftOperator::<MinQuery, i64, _>::composite(&op, &f, &g);
        assert_eq!(
            LeftOperator::<MinQuery, i64, _>::apply(&op, &fg, &1),
            LeftOperator::<MinQuery, i64, _>::apply(
                &op,
                &f,
                &LeftOperator::<MinQuery, i64, _>::apply(&op, &g, &1)
            )
        );
        assert_eq!(LeftOperator::<MinQuery, i64, _>::apply(&op, &fg, &1), 27);
        assert!(LeftOperator::<MinQuery, i64, _>::is_ident(&op, &(1, 0)));
        assert!(!LeftOperator::<MinQuery, i64, _>::is_ident(&op, &fg));
    }
}
