//! Capability Comparator boundary
//!
//! The attribute type system lives outside this engine. A comparator decides,
//! for one named attribute, whether a pool's offered value satisfies a
//! class's requested value; both values are opaque JSON here. The engine only
//! orchestrates calls to it: absence of an offered attribute is handled by
//! the engine itself and never reaches the comparator.

use serde_json::Value;

/// Port for per-attribute request/offer matching
pub trait CapabilityComparator: Send + Sync {
    /// Check whether `offered` satisfies `requested` for the named attribute.
    /// Must be order-independent with respect to attribute evaluation order.
    fn matches(&self, attribute: &str, requested: &Value, offered: &Value) -> bool;
}

/// Baseline comparator: an offer satisfies a request iff the values are
/// equal. Richer semantics (range containment, set membership) belong to the
/// attribute subsystem that supplies its own comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatchComparator;

impl CapabilityComparator for ExactMatchComparator {
    fn matches(&self, _attribute: &str, requested: &Value, offered: &Value) -> bool {
        offered == requested
    }
}

/// Adapter lifting a plain function into a comparator
pub struct FnComparator<F>(pub F);

impl<F> CapabilityComparator for FnComparator<F>
where
    F: Fn(&str, &Value, &Value) -> bool + Send + Sync,
{
    fn matches(&self, attribute: &str, requested: &Value, offered: &Value) -> bool {
        (self.0)(attribute, requested, offered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exact_match() {
        let cmp = ExactMatchComparator;
        assert!(cmp.matches("media", &json!("ssd"), &json!("ssd")));
        assert!(!cmp.matches("media", &json!("ssd"), &json!("hdd")));
        assert!(cmp.matches("iops", &json!(1000), &json!(1000)));
        assert!(!cmp.matches("iops", &json!(1000), &json!("1000")));
    }

    #[test]
    fn test_fn_comparator() {
        // Numeric offers satisfy numeric requests when >= requested
        let cmp = FnComparator(|_: &str, req: &Value, offer: &Value| {
            match (req.as_u64(), offer.as_u64()) {
                (Some(r), Some(o)) => o >= r,
                _ => offer == req,
            }
        });
        assert!(cmp.matches("iops", &json!(1000), &json!(5000)));
        assert!(!cmp.matches("iops", &json!(1000), &json!(500)));
        assert!(cmp.matches("media", &json!("ssd"), &json!("ssd")));
    }
}
