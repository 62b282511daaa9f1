//! Order Numbers
//!
//! Customer-facing order numbers are three-digit strings between `100` and `999`. New numbers
//! are picked at random and probed against the numbers already in use; when every probe
//! collides the final attempt scans the taken numbers and picks from whatever is left.

use std::{fmt, future::Future, str::FromStr};

use rand::{Rng, seq::SliceRandom};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Attempts made before allocation gives up.
pub const MAX_ATTEMPTS: usize = 20;

/// Number of distinct order numbers.
pub const CAPACITY: usize = 900;

/// Errors raised while parsing an order number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderNumberError {
    /// Not a decimal number.
    #[error("order number must be numeric, got \"{0}\"")]
    NotNumeric(String),

    /// Numeric but outside `100..=999`.
    #[error("order number {0} is outside 100..=999")]
    OutOfRange(u16),
}

/// Errors raised while allocating an order number.
#[derive(Debug, Error)]
pub enum AllocationError<E: std::error::Error + 'static> {
    /// Every order number is taken.
    #[error("no free order number after {attempts} attempts")]
    Exhausted {
        /// Attempts made, including the final scan.
        attempts: usize,
    },

    /// The registry of taken numbers could not be queried.
    #[error("order number registry failed")]
    Registry(#[source] E),
}

/// A three-digit order number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber(u16);

impl OrderNumber {
    /// Smallest order number.
    pub const MIN: u16 = 100;

    /// Largest order number.
    pub const MAX: u16 = 999;

    /// Uniformly random order number.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(Self::MIN..=Self::MAX))
    }

    /// Every order number, in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Numeric value.
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for OrderNumber {
    type Error = OrderNumberError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(OrderNumberError::OutOfRange(value))
        }
    }
}

impl FromStr for OrderNumber {
    type Err = OrderNumberError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();

        if trimmed.len() != 3 || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(OrderNumberError::NotNumeric(value.to_string()));
        }

        let number = trimmed
            .parse::<u16>()
            .map_err(|_parse| OrderNumberError::NotNumeric(value.to_string()))?;

        Self::try_from(number)
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = OrderNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderNumber> for String {
    fn from(value: OrderNumber) -> Self {
        value.to_string()
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of truth for which order numbers are already in use.
pub trait OrderNumberRegistry {
    /// Error raised by the underlying store.
    type Error: std::error::Error + 'static;

    /// Whether `number` belongs to an existing order.
    fn is_taken(
        &mut self,
        number: OrderNumber,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Every order number currently in use.
    fn taken_numbers(
        &mut self,
    ) -> impl Future<Output = Result<FxHashSet<OrderNumber>, Self::Error>> + Send;
}

/// Picks unused order numbers.
#[derive(Debug, Clone, Copy)]
pub struct OrderNumberAllocator {
    max_attempts: usize,
}

impl Default for OrderNumberAllocator {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl OrderNumberAllocator {
    /// Allocator making at most `max_attempts` registry calls. At least one attempt is
    /// always made.
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Attempts made before giving up.
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Allocate an order number not currently taken.
    ///
    /// The number is only reserved once an order carrying it is stored; concurrent
    /// allocations can pick the same number and must be caught by the store.
    ///
    /// # Errors
    ///
    /// - [`AllocationError::Exhausted`]: every order number is taken.
    /// - [`AllocationError::Registry`]: the registry could not be queried.
    pub async fn allocate<R, G>(
        &self,
        rng: &mut R,
        registry: &mut G,
    ) -> Result<OrderNumber, AllocationError<G::Error>>
    where
        R: Rng + ?Sized,
        G: OrderNumberRegistry + ?Sized,
    {
        for attempt in 1..self.max_attempts {
            let candidate = OrderNumber::random(rng);

            let taken = registry
                .is_taken(candidate)
                .await
                .map_err(AllocationError::Registry)?;

            if !taken {
                debug!(attempt, order_number = %candidate, "allocated order number");

                return Ok(candidate);
            }
        }

        let taken = registry
            .taken_numbers()
            .await
            .map_err(AllocationError::Registry)?;

        let free: Vec<OrderNumber> = OrderNumber::all()
            .filter(|number| !taken.contains(number))
            .collect();

        if let Some(number) = free.choose(rng).copied() {
            debug!(
                attempt = self.max_attempts,
                free = free.len(),
                order_number = %number,
                "allocated order number from scan"
            );

            return Ok(number);
        }

        warn!(attempts = self.max_attempts, "order numbers exhausted");

        Err(AllocationError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use rand::{SeedableRng, rngs::StdRng};
    use testresult::TestResult;

    use super::*;

    #[derive(Default)]
    struct CountingRegistry {
        taken: FxHashSet<OrderNumber>,
        calls: usize,
    }

    impl CountingRegistry {
        fn taking(numbers: impl IntoIterator<Item = OrderNumber>) -> Self {
            Self {
                taken: numbers.into_iter().collect(),
                calls: 0,
            }
        }
    }

    impl OrderNumberRegistry for CountingRegistry {
        type Error = Infallible;

        async fn is_taken(&mut self, number: OrderNumber) -> Result<bool, Infallible> {
            self.calls += 1;

            Ok(self.taken.contains(&number))
        }

        async fn taken_numbers(&mut self) -> Result<FxHashSet<OrderNumber>, Infallible> {
            self.calls += 1;

            Ok(self.taken.clone())
        }
    }

    #[test]
    fn parses_three_digit_numbers_only() {
        assert_eq!("742".parse::<OrderNumber>().map(OrderNumber::get), Ok(742));
        assert_eq!(
            "099".parse::<OrderNumber>(),
            Err(OrderNumberError::OutOfRange(99))
        );
        assert!("1000".parse::<OrderNumber>().is_err());
        assert!("12a".parse::<OrderNumber>().is_err());
    }

    #[test]
    fn random_numbers_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1_000 {
            let number = OrderNumber::random(&mut rng).get();

            assert!((OrderNumber::MIN..=OrderNumber::MAX).contains(&number));
        }
    }

    #[test]
    fn serialises_as_a_string() -> TestResult {
        let number = OrderNumber::try_from(512_u16)?;

        assert_eq!(serde_json::to_string(&number)?, "\"512\"");
        assert_eq!(serde_json::from_str::<OrderNumber>("\"512\"")?, number);

        Ok(())
    }

    #[tokio::test]
    async fn empty_registry_allocates_on_first_probe() -> TestResult {
        let mut registry = CountingRegistry::default();
        let mut rng = StdRng::seed_from_u64(1);

        OrderNumberAllocator::default()
            .allocate(&mut rng, &mut registry)
            .await?;

        assert_eq!(registry.calls, 1);

        Ok(())
    }

    #[tokio::test]
    async fn finds_the_single_free_number() -> TestResult {
        let free = OrderNumber::try_from(437_u16)?;
        let mut registry = CountingRegistry::taking(OrderNumber::all().filter(|n| *n != free));
        let mut rng = StdRng::seed_from_u64(42);

        let allocated = OrderNumberAllocator::default()
            .allocate(&mut rng, &mut registry)
            .await?;

        assert_eq!(allocated, free);
        assert!(registry.calls <= MAX_ATTEMPTS);

        Ok(())
    }

    #[tokio::test]
    async fn full_registry_is_exhausted_within_the_attempt_budget() {
        let mut registry = CountingRegistry::taking(OrderNumber::all());
        let mut rng = StdRng::seed_from_u64(3);

        let result = OrderNumberAllocator::default()
            .allocate(&mut rng, &mut registry)
            .await;

        assert!(
            matches!(
                result,
                Err(AllocationError::Exhausted {
                    attempts: MAX_ATTEMPTS
                })
            ),
            "got {result:?}"
        );
        assert_eq!(registry.calls, MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn single_attempt_allocator_goes_straight_to_the_scan() -> TestResult {
        let mut registry = CountingRegistry::default();
        let mut rng = StdRng::seed_from_u64(9);

        OrderNumberAllocator::with_max_attempts(0)
            .allocate(&mut rng, &mut registry)
            .await?;

        assert_eq!(registry.calls, 1);
        assert_eq!(OrderNumber::all().count(), CAPACITY);

        Ok(())
    }
}
