pub const SELECT_BUILDER_MESSAGE: &str = "Please select a builder before uploading a PDF";

pub fn is_upload_allowed(builder_name: &str) -> bool {
    !builder_name.trim().is_empty()
}

/// Tracks whether PDF upload is currently allowed.
///
/// The gate is re-evaluated on every change to the builder name, whether typed
/// or filled in from a search result. [`BuilderGate::evaluate`] reports a
/// warning only when the gate moves into the disallowed state, so repeated
/// edits of an already-empty field stay quiet.
#[derive(Debug, Clone, Default)]
pub struct BuilderGate {
    allowed: Option<bool>,
}

impl BuilderGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the gate. Returns `true` when the caller should warn.
    pub fn evaluate(&mut self, builder_name: &str) -> bool {
        let allowed = is_upload_allowed(builder_name);
        let previous = self.allowed.replace(allowed);

        let entered_disallowed = !allowed && previous != Some(false);
        if entered_disallowed {
            tracing::debug!("Upload disabled until a builder is selected");
        }
        entered_disallowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_names_block_upload() {
        assert!(!is_upload_allowed(""));
        assert!(!is_upload_allowed("   \t"));
        assert!(is_upload_allowed(" Acme Homes "));
    }

    #[test]
    fn test_first_evaluation_warns_when_empty() {
        let mut gate = BuilderGate::new();
        assert!(gate.evaluate(""));
        assert!(!gate.evaluate(""));
    }

    #[test]
    fn test_warns_only_on_transition() {
        let mut gate = BuilderGate::new();

        assert!(!gate.evaluate("Acme Homes"));

        assert!(gate.evaluate(""));
        assert!(!gate.evaluate(" "));
        assert!(!gate.evaluate(""));

        assert!(!gate.evaluate("Beta Build"));
        assert!(gate.evaluate(""));
    }
}
