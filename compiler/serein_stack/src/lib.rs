//! Stack safety utilities for deep recursion.
//!
//! The parser, the type analyzer and the interpreter all recurse over the
//! AST. Deeply nested expressions (long `+` chains, nested parentheses,
//! `else if` ladders) would overflow a fixed stack, so recursive entry
//! points grow the stack on demand.
//!
//! - **Native targets**: `stacker` grows the stack when the red zone is hit.
//! - **WASM targets**: no-op passthrough.
//!
//! The interpreter's node evaluations are boxed futures; their recursion
//! happens inside `poll`, so [`StackGuarded`] applies the same guard to each
//! poll of a wrapped future.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// ```text
/// fn parse_expression(&mut self) -> Result<NodeId, ParseError> {
///     ensure_sufficient_stack(|| self.parse_logical())
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// A future whose every poll runs under [`ensure_sufficient_stack`].
pub struct StackGuarded<F> {
    inner: F,
}

impl<F> StackGuarded<F> {
    pub fn new(inner: F) -> Self {
        StackGuarded { inner }
    }
}

impl<F: Future + Unpin> Future for StackGuarded<F> {
    type Output = F::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let inner = &mut self.inner;
        ensure_sufficient_stack(|| Pin::new(inner).poll(cx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shallow_recursion() {
        fn factorial(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n <= 1 { 1 } else { n * factorial(n - 1) })
        }

        assert_eq!(factorial(10), 3_628_800);
    }

    #[test]
    fn test_deep_recursion() {
        fn deep_recurse(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { deep_recurse(n - 1) + 1 })
        }

        assert_eq!(deep_recurse(100_000), 100_000);
    }

    #[test]
    fn test_works_with_result_type() {
        let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(123));
        assert_eq!(result, Ok(123));
    }

    #[tokio::test]
    async fn test_deep_async_recursion() {
        fn count(n: u64) -> Pin<Box<dyn Future<Output = u64> + Send>> {
            Box::pin(StackGuarded::new(Box::pin(async move {
                if n == 0 {
                    0
                } else {
                    count(n - 1).await + 1
                }
            })))
        }

        assert_eq!(count(20_000).await, 20_000);
    }
}
