// ABOUTME: Management label schema shared with the container runtime.
// ABOUTME: Builds the creation-time label set and parses inspected labels into a typed record.

use crate::identity::InstanceId;
use crate::types::VolumeName;
use std::collections::HashMap;

/// Prefix shared by every ai-shell label key.
pub const LABEL_NAMESPACE: &str = "com.nimzi.ai-shell";

pub const LABEL_MANAGED: &str = "com.nimzi.ai-shell.managed";
pub const LABEL_SCHEMA: &str = "com.nimzi.ai-shell.schema";
pub const LABEL_INSTANCE: &str = "com.nimzi.ai-shell.instance";
pub const LABEL_VOLUME: &str = "com.nimzi.ai-shell.volume";

/// The only value of [`LABEL_MANAGED`] that marks a container as ours.
pub const MANAGED_VALUE: &str = "true";

pub const SCHEMA_VERSION: u32 = 1;

// Workdir is never a label; it is read from the /work bind mount.

/// Labels applied when an instance's container is created.
pub fn creation_labels(instance_id: &InstanceId, volume: &VolumeName) -> Vec<(String, String)> {
    vec![
        (LABEL_MANAGED.to_string(), MANAGED_VALUE.to_string()),
        (LABEL_SCHEMA.to_string(), SCHEMA_VERSION.to_string()),
        (LABEL_INSTANCE.to_string(), instance_id.to_string()),
        (LABEL_VOLUME.to_string(), volume.to_string()),
    ]
}

/// State of the managed marker on an inspected container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagedMarker {
    Absent,
    Managed,
    /// Present, but not exactly [`MANAGED_VALUE`].
    Other(String),
}

/// Typed view of the management labels found on a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementLabels {
    pub marker: ManagedMarker,
    pub schema: Option<u32>,
    pub instance: Option<String>,
    pub volume: Option<String>,
}

impl ManagementLabels {
    pub fn parse(labels: &HashMap<String, String>) -> Self {
        let marker = match labels.get(LABEL_MANAGED) {
            None => ManagedMarker::Absent,
            Some(v) if v == MANAGED_VALUE => ManagedMarker::Managed,
            Some(v) => ManagedMarker::Other(v.clone()),
        };

        Self {
            marker,
            schema: labels.get(LABEL_SCHEMA).and_then(|v| v.trim().parse().ok()),
            instance: non_blank(labels.get(LABEL_INSTANCE)),
            volume: non_blank(labels.get(LABEL_VOLUME)),
        }
    }

    pub fn is_managed(&self) -> bool {
        self.marker == ManagedMarker::Managed
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
