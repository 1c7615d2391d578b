use std::{iter, ops::RangeBounds};

use crate::{
    get_lr,
    operator::{FnOperator, LeftOperator},
    query::{FnQuery, Query},
    Error, Result,
};

/// 遅延伝搬セグメント木
///
/// モノイド`Q`の要素`T`の列に対して、区間積の取得と作用素`U`の区間作用をO(log(n))で行う。
///
/// 内部では長さ`n`以上の最小の2冪`size`を葉の数とする完全二分木を配列で表す。
/// 頂点`k`の子は`2k`と`2k + 1`であり、葉`i`は`size + i`に置かれる。
/// `lazy[k]`は頂点`k`の値には反映済みで、子にはまだ作用させていない作用素である。
#[derive(Clone, Debug)]
pub struct LazySegTree<Q, O, T, U> {
    query: Q,
    operator: O,
    len: usize,
    log: u32,
    data: Box<[T]>,
    lazy: Box<[U]>,
}

impl<T, U, Q: Query<T>, O: LeftOperator<Q, T, U>> LazySegTree<Q, O, T, U> {
    /// データのスライスから遅延セグメント木を構築する。
    pub fn new(query: Q, operator: O, data: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_iter_query_operator(query, operator, data.iter().cloned())
    }

    /// イテレータから遅延セグメント木をO(n)で構築する。
    ///
    /// 長さ0の列も受け付ける。その場合、区間積はすべて単位元になり、一点へのアクセスはすべて範囲外となる。
    pub fn from_iter_query_operator<I>(query: Q, operator: O, iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let leaves = iter.into_iter().collect::<Vec<_>>();
        let len = leaves.len();
        let size = len.next_power_of_two();
        let log = size.trailing_zeros();
        let data = iter::repeat_with(|| query.ident())
            .take(size)
            .chain(leaves)
            .chain(iter::repeat_with(|| query.ident()).take(size - len))
            .collect();
        let lazy = iter::repeat_with(|| operator.ident()).take(size).collect();
        let mut segtree = Self {
            query,
            operator,
            len,
            log,
            data,
            lazy,
        };
        for k in (1..size).rev() {
            segtree.update(k);
        }
        log::trace!("built lazy segment tree: len = {len}, size = {size}, log = {log}");
        segtree
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn size(&self) -> usize {
        self.lazy.len()
    }

    fn check_index(&self, i: usize) -> Result<usize> {
        if i < self.len {
            Ok(i + self.size())
        } else {
            Err(Error::IndexOutOfRange {
                index: i,
                len: self.len,
            })
        }
    }

    fn update(&mut self, k: usize) {
        self.data[k] = self.query.query(&self.data[2 * k], &self.data[2 * k + 1]);
    }

    fn all_apply(&mut self, k: usize, f: &U) {
        self.data[k] = self.operator.apply(f, &self.data[k]);
        if k < self.size() {
            self.lazy[k] = self.operator.composite(f, &self.lazy[k]);
        }
    }

    fn push(&mut self, k: usize) {
        if self.operator.is_ident(&self.lazy[k]) {
            return;
        }
        let f = std::mem::replace(&mut self.lazy[k], self.operator.ident());
        self.all_apply(2 * k, &f);
        self.all_apply(2 * k + 1, &f);
    }

    /// 根から頂点`k`の親まで順に伝搬する。
    fn push_ancestors(&mut self, k: usize) {
        for h in (1..=self.log).rev() {
            self.push(k >> h);
        }
    }

    fn update_ancestors(&mut self, k: usize) {
        for h in 1..=self.log {
            self.update(k >> h);
        }
    }

    /// 葉の半開区間`[l, r)`の境界の祖先のうち、区間に一部だけ含まれるものを根から順に伝搬する。
    fn push_range_ancestors(&mut self, l: usize, r: usize) {
        for h in (1..=self.log).rev() {
            if ((l >> h) << h) != l {
                self.push(l >> h);
            }
            if ((r >> h) << h) != r {
                self.push((r - 1) >> h);
            }
        }
    }

    fn update_range_ancestors(&mut self, l: usize, r: usize) {
        for h in 1..=self.log {
            if ((l >> h) << h) != l {
                self.update(l >> h);
            }
            if ((r >> h) << h) != r {
                self.update((r - 1) >> h);
            }
        }
    }

    /// `i`番目の要素を返す。
    pub fn get(&mut self, i: usize) -> Result<T>
    where
        T: Clone,
    {
        let k = self.check_index(i)?;
        self.push_ancestors(k);
        Ok(self.data[k].clone())
    }

    /// `i`番目の要素を`x`で置き換える。
    pub fn set(&mut self, i: usize, x: T) -> Result<()> {
        let k = self.check_index(i)?;
        self.push_ancestors(k);
        self.data[k] = x;
        self.update_ancestors(k);
        Ok(())
    }

    /// 指定区間の積をO(log(n))で求める。空区間なら単位元を返す。
    pub fn prod(&mut self, range: impl RangeBounds<usize>) -> Result<T> {
        let (l, r) = get_lr(self.len, range)?;
        if l == r {
            return Ok(self.query.ident());
        }
        let (l, r) = (l + self.size(), r + self.size());
        self.push_range_ancestors(l, r);

        let mut l_query = self.query.ident();
        let mut r_query = self.query.ident();
        let (mut l, mut r) = (l, r);
        while l < r {
            if l & 1 == 1 {
                l_query = self.query.query(&l_query, &self.data[l]);
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                r_query = self.query.query(&self.data[r], &r_query);
            }
            l >>= 1;
            r >>= 1;
        }
        Ok(self.query.query(&l_query, &r_query))
    }

    /// 全体の積をO(1)で返す。
    pub fn all_prod(&self) -> T
    where
        T: Clone,
    {
        self.data[1].clone()
    }

    /// `i`番目の要素に`f`を作用させる。
    pub fn apply(&mut self, i: usize, f: U) -> Result<()> {
        let k = self.check_index(i)?;
        self.push_ancestors(k);
        self.data[k] = self.operator.apply(&f, &self.data[k]);
        self.update_ancestors(k);
        Ok(())
    }

    /// 指定区間の各要素に`f`をO(log(n))で作用させる。
    pub fn apply_range(&mut self, range: impl RangeBounds<usize>, f: U) -> Result<()> {
        let (l, r) = get_lr(self.len, range)?;
        if l == r {
            return Ok(());
        }
        let (l, r) = (l + self.size(), r + self.size());
        self.push_range_ancestors(l, r);

        {
            let (mut l, mut r) = (l, r);
            while l < r {
                if l & 1 == 1 {
                    self.all_apply(l, &f);
                    l += 1;
                }
                if r & 1 == 1 {
                    r -= 1;
                    self.all_apply(r, &f);
                }
                l >>= 1;
                r >>= 1;
            }
        }

        self.update_range_ancestors(l, r);
        Ok(())
    }

    /// `pred(self.prod(l..r))`が`true`となる最大の`r`をO(log(n))で求める。
    ///
    /// `pred`は単調でなければならない。すなわち`pred(self.prod(l..r))`が`false`ならば、
    /// `r`より大きいすべての`r'`について`pred(self.prod(l..r'))`も`false`でなければならない。
    /// 単位元に対して`pred`が`false`を返す場合は[`Error::IdentityRejected`]を返す。
    pub fn max_right<P>(&mut self, l: usize, mut pred: P) -> Result<usize>
    where
        P: FnMut(&T) -> bool,
    {
        if l > self.len {
            return Err(Error::IndexOutOfRange {
                index: l,
                len: self.len,
            });
        }
        if !pred(&self.query.ident()) {
            log::debug!("max_right({l}) rejected: predicate is false for the identity");
            return Err(Error::IdentityRejected);
        }
        if l == self.len {
            return Ok(self.len);
        }
        let mut l = l + self.size();
        self.push_ancestors(l);

        let mut l_query = self.query.ident();
        loop {
            while l & 1 == 0 {
                l >>= 1;
            }
            let next_query = self.query.query(&l_query, &self.data[l]);
            if !pred(&next_query) {
                while l < self.size() {
                    self.push(l);
                    l <<= 1;
                    let next_query = self.query.query(&l_query, &self.data[l]);
                    if pred(&next_query) {
                        l_query = next_query;
                        l += 1;
                    }
                }
                return Ok(l - self.size());
            }
            l_query = next_query;
            l += 1;
            if l.is_power_of_two() {
                return Ok(self.len);
            }
        }
    }

    /// `pred(self.prod(l..r))`が`true`となる最小の`l`をO(log(n))で求める。
    ///
    /// `pred`は[`Self::max_right`]と同様に単調でなければならない。
    pub fn min_left<P>(&mut self, r: usize, mut pred: P) -> Result<usize>
    where
        P: FnMut(&T) -> bool,
    {
        if r > self.len {
            return Err(Error::IndexOutOfRange {
                index: r,
                len: self.len,
            });
        }
        if !pred(&self.query.ident()) {
            log::debug!("min_left({r}) rejected: predicate is false for the identity");
            return Err(Error::IdentityRejected);
        }
        if r == 0 {
            return Ok(0);
        }
        let mut r = r + self.size();
        self.push_ancestors(r - 1);

        let mut r_query = self.query.ident();
        loop {
            r -= 1;
            while r > 1 && r & 1 == 1 {
                r >>= 1;
            }
            let next_query = self.query.query(&self.data[r], &r_query);
            if !pred(&next_query) {
                while r < self.size() {
                    self.push(r);
                    r = 2 * r + 1;
                    let next_query = self.query.query(&self.data[r], &r_query);
                    if pred(&next_query) {
                        r_query = next_query;
                        r -= 1;
                    }
                }
                return Ok(r + 1 - self.size());
            }
            r_query = next_query;
            if r.is_power_of_two() {
                return Ok(0);
            }
        }
    }

    /// 保留中の作用素をすべて伝搬し、要素の列を返す。
    pub fn to_vec(&mut self) -> Vec<T>
    where
        T: Clone,
    {
        for k in 1..self.size() {
            self.push(k);
        }
        let size = self.size();
        self.data[size..size + self.len].to_vec()
    }

    pub fn into_vec(mut self) -> Vec<T> {
        for k in 1..self.size() {
            self.push(k);
        }
        let size = self.size();
        let len = self.len;
        self.data
            .into_vec()
            .into_iter()
            .skip(size)
            .take(len)
            .collect()
    }
}

impl<T, U, C, A, F> LazySegTree<FnQuery<F, T>, FnOperator<C, A, U>, T, U>
where
    F: Fn(&T, &T) -> T,
    T: Clone,
    C: Fn(&U, &U) -> U,
    A: Fn(&U, &T) -> T,
    U: Clone + PartialEq,
{
    /// 関数と単位元から遅延セグメント木を構築する。
    ///
    /// * `op_x`, `e_x`: 要素のモノイドの演算と単位元
    /// * `op_m`, `e_m`: 作用素の合成と単位元。`op_m(f, g)`は`g`の後に`f`を作用させる作用素
    /// * `action`: `action(f, x)`は`x`に`f`を作用させた値
    ///
    /// 保留中の作用素が`e_m`と等しい頂点では伝搬を省略する。
    pub fn from_fns<I>(iter: I, op_x: F, e_x: T, op_m: C, e_m: U, action: A) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_iter_query_operator(
            FnQuery::new(op_x, e_x),
            FnOperator::new(op_m, action, e_m),
            iter,
        )
    }
}

impl<T, U, Q, O> FromIterator<T> for LazySegTree<Q, O, T, U>
where
    Q: Query<T> + Default,
    O: LeftOperator<Q, T, U> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_query_operator(Q::default(), O::default(), iter)
    }
}
