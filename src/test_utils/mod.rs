//! Helpers shared by unit and integration tests.

pub mod fixtures;

pub use fixtures::UnitTestFixture;

/// One row of a table-driven test.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
    pub should_panic: bool,
}

impl<I, E> TestCase<I, E> {
    pub const fn new(name: &'static str, input: I, expected: E) -> Self {
        Self {
            name,
            input,
            expected,
            should_panic: false,
        }
    }
}

/// Run every case through `test_fn`, logging input, output and timing.
///
/// Stops at the first failing case and describes it in the error.
///
/// # Errors
///
/// A message naming the failing case.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: std::fmt::Debug + Clone + std::panic::RefUnwindSafe,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E + std::panic::RefUnwindSafe,
{
    for case in cases {
        let start = std::time::Instant::now();
        println!("[TEST] Running: {}", case.name);
        println!("[TEST] Input: {:?}", case.input);

        let result = std::panic::catch_unwind(|| test_fn(case.input.clone()));
        let elapsed = start.elapsed();

        match (result, case.should_panic) {
            (Err(_), true) => {
                println!("[TEST] PASSED: {} (expected panic, {elapsed:?})\n", case.name);
            }
            (Ok(_), true) => return Err(format!("Test '{}' expected panic", case.name)),
            (Err(_), false) => {
                return Err(format!("Test '{}' panicked unexpectedly", case.name));
            }
            (Ok(actual), false) => {
                println!("[TEST] Expected: {:?}", case.expected);
                println!("[TEST] Actual: {actual:?}");
                if actual != case.expected {
                    return Err(format!(
                        "Test '{}' failed: expected {:?}, got {:?}",
                        case.name, case.expected, actual
                    ));
                }
                println!("[TEST] PASSED: {} ({elapsed:?})\n", case.name);
            }
        }
    }
    Ok(())
}
