pub trait HasAddIdent {
    const IDENT: Self;
}

pub trait HasMin {
    const MIN: Self;
}

pub trait HasMax {
    const MAX: Self;
}

/// 同じ値を`n`個足し合わせる。区間加算・区間代入を和の区間に作用させるのに使う。
///
/// 整数型では`2^BITS`を法として計算するので、`n`が型に収まらなくても最終的な結果が型に収まる限り正しい値を返す。
pub trait Times: Sized {
    /// `self`を`n`個足した値を返す。
    fn times(&self, n: usize) -> Self;

    /// `self`に`f`を`n`個足した値を返す。
    fn add_times(&self, f: &Self, n: usize) -> Self;
}

macro_rules! impl_ident_num {
    ($($t:ty),* $(,)?) => {
        $(impl HasAddIdent for $t {
            const IDENT: Self = 0;
        }

        impl HasMin for $t {
            const MIN: Self = <$t>::MIN;
        }

        impl HasMax for $t {
            const MAX: Self = <$t>::MAX;
        }

        impl Times for $t {
            fn times(&self, n: usize) -> Self {
                // `as`による切り捨ては`2^BITS`を法とした剰余を取るのと同じ
                self.wrapping_mul(n as $t)
            }
            fn add_times(&self, f: &Self, n: usize) -> Self {
                self.wrapping_add(f.times(n))
            }
        })*
    };
}

impl_ident_num!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
