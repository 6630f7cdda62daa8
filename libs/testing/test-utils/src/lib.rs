//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure:
//! - `TestDataBuilder`: Deterministic test data generation
//! - `embedding_fixture`: Deterministic fixed-dimension embedding vectors
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust
//! use test_utils::TestDataBuilder;
//!
//! let builder = TestDataBuilder::from_test_name("my_test");
//! let restaurant_id = builder.restaurant_id("main");
//! let review_text = builder.name("review", "main");
//! ```

use uuid::Uuid;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded random data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// This is the recommended way to create a builder for consistent test data.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a deterministic UUID for testing
    pub fn uuid(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// Generate a restaurant id unique to this test
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let id = builder.restaurant_id("main");
    /// // Returns: "test-restaurant-12345-main"
    /// ```
    pub fn restaurant_id(&self, suffix: &str) -> String {
        self.name("restaurant", suffix)
    }

    /// Generate a unique name for testing
    ///
    /// # Arguments
    ///
    /// * `prefix` - The type of value (e.g., "restaurant", "review")
    /// * `suffix` - A unique identifier within the test (e.g., "main", "dup")
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Deterministic embedding vector of the given dimension.
///
/// The values depend only on `seed`, so two fixtures with the same seed
/// are identical and fixtures with different seeds differ. Components lie
/// in [-0.5, 0.5).
pub fn embedding_fixture(seed: u64, dim: usize) -> Vec<f32> {
    // splitmix64 keeps the fixture stable across platforms
    let mut state = seed.wrapping_add(0x9E3779B97F4A7C15);
    (0..dim)
        .map(|_| {
            state = state.wrapping_add(0x9E3779B97F4A7C15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
            z ^= z >> 31;
            (z as f64 / u64::MAX as f64) as f32 - 0.5
        })
        .collect()
}

/// Test assertion helpers
pub mod assertions {
    use uuid::Uuid;

    /// Assert that two UUIDs are equal with a nice error message
    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that two embedding vectors match component-wise
    pub fn assert_embedding_eq(actual: &[f32], expected: &[f32], context: &str) {
        assert_eq!(
            actual.len(),
            expected.len(),
            "{}: dimension mismatch ({} vs {})",
            context,
            actual.len(),
            expected.len()
        );
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a - e).abs() < f32::EPSILON,
                "{}: component {} differs ({} vs {})",
                context,
                i,
                a,
                e
            );
        }
    }
}
