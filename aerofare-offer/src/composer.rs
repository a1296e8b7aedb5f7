use aerofare_catalog::airlines::DEFAULT_PREMIUM_SURCHARGE;
use aerofare_core::pricing::{PricingConfiguration, RoutePrice};

use crate::random::RandomSource;

/// A composed fare. `amount` keeps full precision so per-passenger totals do
/// not accumulate rounding error; `rounded()` is the display price.
#[derive(Debug, Clone, PartialEq)]
pub struct Fare {
    pub amount: f64,
    pub base_price: f64,
    pub class_multiplier: f64,
    pub premium_applied: bool,
    pub trip_multiplier: f64,
}

impl Fare {
    /// Display price, rounded to the nearest whole unit.
    pub fn rounded(&self) -> i64 {
        self.amount.round() as i64
    }

    /// Multi-passenger total, rounded once from the unrounded amount.
    pub fn total_for(&self, passengers: u32) -> i64 {
        (self.amount * passengers as f64).round() as i64
    }
}

/// Composes a randomized fare from a price band and the admin-configured
/// multipliers.
#[derive(Debug, Clone)]
pub struct FareComposer {
    premium_surcharge: f64,
}

impl FareComposer {
    pub fn new(premium_surcharge: f64) -> Self {
        Self { premium_surcharge }
    }

    /// Draw a base price inside the band, jitter it by the band's fluctuation
    /// margin, then apply cabin, premium-carrier and trip-type multipliers in
    /// that order. Each multiplier is applied exactly once.
    ///
    /// The jitter is centred on zero, so the result may leave
    /// `[min_price, max_price]` by up to the fluctuation amount on either
    /// side. That wider envelope is how the storefront has always priced and
    /// is kept as-is.
    pub fn compose(
        &self,
        config: &PricingConfiguration,
        band: &RoutePrice,
        service_class: &str,
        trip_type: &str,
        premium_carrier: bool,
        rng: &mut dyn RandomSource,
    ) -> Fare {
        let r1 = rng.unit();
        let r2 = rng.unit();

        let price_range = band.max_price - band.min_price;
        let fluctuation_amount = band.fluctuation_percent / 100.0 * band.min_price;
        let base_price = band.min_price + r1 * price_range + (r2 - 0.5) * 2.0 * fluctuation_amount;

        let class_multiplier = config.class_multiplier(service_class);
        let trip_multiplier = config.trip_multiplier(trip_type);

        let mut amount = base_price * class_multiplier;
        if premium_carrier {
            amount *= self.premium_surcharge;
        }
        amount *= trip_multiplier;

        Fare {
            amount,
            base_price,
            class_multiplier,
            premium_applied: premium_carrier,
            trip_multiplier,
        }
    }
}

impl Default for FareComposer {
    fn default() -> Self {
        Self::new(DEFAULT_PREMIUM_SURCHARGE)
    }
}
