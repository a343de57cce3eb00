use std::{
    ops::{AddAssign, DivAssign},
    time::Duration,
};

#[derive(Debug, Copy, Clone, Default)]
pub struct BvhConstructionTime {
    pub wrapping: Duration,
    pub subdivision: Duration,
    pub aggregation: Duration,
}

impl BvhConstructionTime {
    pub fn total(&self) -> Duration {
        self.wrapping + self.subdivision + self.aggregation
    }

    pub fn display(&self, text: &str) -> Self {
        log::info!("{}", text);
        log::info!("  wrapping:    {:?}", self.wrapping);
        log::info!("  subdivision: {:?}", self.subdivision);
        log::info!("  aggregation: {:?}", self.aggregation);
        log::info!("  total:       {:?}", self.total());
        *self
    }
}

impl AddAssign<BvhConstructionTime> for BvhConstructionTime {
    fn add_assign(&mut self, rhs: Self) {
        self.wrapping += rhs.wrapping;
        self.subdivision += rhs.subdivision;
        self.aggregation += rhs.aggregation;
    }
}

impl DivAssign<u32> for BvhConstructionTime {
    fn div_assign(&mut self, rhs: u32) {
        self.wrapping /= rhs;
        self.subdivision /= rhs;
        self.aggregation /= rhs;
    }
}
