//! 模擬用的亂數來源。
//!
//! 每次預測各自建立一個 `ForecastRng`，不共用全域狀態；
//! 給定相同 seed 時抽樣結果完全可重現。

use rand::{Error, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct ForecastRng {
    inner: Pcg64Mcg,
}

impl ForecastRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// 以作業系統亂數初始化
    pub fn from_entropy() -> Self {
        Self {
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    /// 有 seed 用 seed，否則取 entropy
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RngCore for ForecastRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.inner.try_fill_bytes(dest)
    }
}
