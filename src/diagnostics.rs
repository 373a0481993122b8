// ABOUTME: Diagnostics accumulator for non-fatal warnings during bulk cleanup.
// ABOUTME: Collects removal failures that shouldn't abort `rm --nuke` but must be reported.

/// Collects non-fatal warnings during cleanup operations.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during cleanup.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a container removal warning.
    pub fn container_remove(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ContainerRemove,
            message: message.into(),
        }
    }

    /// Create a volume removal warning.
    pub fn volume_remove(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::VolumeRemove,
            message: message.into(),
        }
    }

    /// Create an image removal warning.
    pub fn image_remove(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ImageRemove,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A managed container could not be stopped or removed.
    ContainerRemove,
    /// A home volume could not be removed (often still in use).
    VolumeRemove,
    /// An image could not be removed (often used by another container).
    ImageRemove,
}
