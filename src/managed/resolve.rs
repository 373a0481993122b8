// ABOUTME: Resolves a user-supplied target string to exactly one managed instance.
// ABOUTME: Strategies run in a fixed order; ambiguity at any stage stops resolution.

use super::ManagedInstance;
use super::list::list_managed;
use crate::runtime::{ContainerError, ContainerOps};
use crate::types::{CanonicalWorkdir, PathContext};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("target must not be empty")]
    InvalidTarget,

    #[error("no ai-shell managed containers found (run: ai-shell up)")]
    NoManagedInstances,

    #[error("no managed container matches target {target:?} (run: ai-shell ls)")]
    NotFound { target: String },

    #[error("ambiguous target {target:?}; candidates:\n{}", format_candidates(.candidates))]
    Ambiguous {
        target: String,
        candidates: Vec<ManagedInstance>,
    },

    #[error("cannot list managed containers: {0}")]
    List(#[from] ContainerError),
}

/// One way a target can identify an instance, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    ContainerName,
    InstanceId,
    InstanceIdPrefix,
    ContainerNamePrefix,
    Workdir,
}

impl MatchStrategy {
    pub const ORDER: [MatchStrategy; 5] = [
        MatchStrategy::ContainerName,
        MatchStrategy::InstanceId,
        MatchStrategy::InstanceIdPrefix,
        MatchStrategy::ContainerNamePrefix,
        MatchStrategy::Workdir,
    ];
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStrategy::ContainerName => "container name",
            MatchStrategy::InstanceId => "instance id",
            MatchStrategy::InstanceIdPrefix => "instance id prefix",
            MatchStrategy::ContainerNamePrefix => "container name prefix",
            MatchStrategy::Workdir => "workdir",
        };
        f.write_str(s)
    }
}

/// Heuristic for targets that should also be tried as a workdir.
///
/// Short bare strings like `a1b2` are never treated as paths.
pub fn looks_like_path(target: &str) -> bool {
    target.contains('/') || target.starts_with('.') || target.starts_with('~')
}

/// Pick the single instance `target` identifies.
///
/// Each strategy looks at the full list. The first one with exactly one
/// match wins; one with several matches fails with [`ResolveError::Ambiguous`]
/// without trying the rest.
pub fn match_target<'a>(
    target: &str,
    instances: &'a [ManagedInstance],
    ctx: &PathContext,
) -> Result<&'a ManagedInstance, ResolveError> {
    let target = target.trim();
    if target.is_empty() {
        return Err(ResolveError::InvalidTarget);
    }

    // A path that cannot be canonicalized (e.g. deleted) is compared literally.
    let path_target = looks_like_path(target).then(|| {
        CanonicalWorkdir::resolve(target, ctx)
            .map(|wd| wd.as_str().to_string())
            .unwrap_or_else(|_| target.to_string())
    });

    for strategy in MatchStrategy::ORDER {
        let matches: Vec<&ManagedInstance> = match (strategy, &path_target) {
            (MatchStrategy::Workdir, None) => continue,
            (MatchStrategy::Workdir, Some(wd)) => instances
                .iter()
                .filter(|i| i.workdir.as_deref() == Some(wd.as_str()))
                .collect(),
            _ => instances
                .iter()
                .filter(|i| strategy_matches(strategy, i, target))
                .collect(),
        };

        match matches.len() {
            0 => {}
            1 => {
                let only = matches[0];
                tracing::debug!(%target, %strategy, container = %only.container, "target resolved");
                return Ok(only);
            }
            count => {
                tracing::debug!(%target, %strategy, count, "target is ambiguous");
                return Err(ResolveError::Ambiguous {
                    target: target.to_string(),
                    candidates: matches.into_iter().cloned().collect(),
                });
            }
        }
    }

    Err(ResolveError::NotFound {
        target: target.to_string(),
    })
}

fn strategy_matches(strategy: MatchStrategy, instance: &ManagedInstance, target: &str) -> bool {
    match strategy {
        MatchStrategy::ContainerName => instance.container.as_str() == target,
        MatchStrategy::InstanceId => instance.instance_id_str() == target,
        MatchStrategy::InstanceIdPrefix => instance
            .instance_id
            .as_deref()
            .is_some_and(|id| !id.is_empty() && id.starts_with(target)),
        MatchStrategy::ContainerNamePrefix => instance.container.as_str().starts_with(target),
        MatchStrategy::Workdir => false,
    }
}

/// List the live managed fleet and match `target` against it.
pub async fn resolve_target<R>(
    runtime: &R,
    target: &str,
    ctx: &PathContext,
) -> Result<ManagedInstance, ResolveError>
where
    R: ContainerOps + ?Sized,
{
    if target.trim().is_empty() {
        return Err(ResolveError::InvalidTarget);
    }
    let instances = list_managed(runtime).await?;
    if instances.is_empty() {
        return Err(ResolveError::NoManagedInstances);
    }
    match_target(target, &instances, ctx).cloned()
}

fn format_candidates(candidates: &[ManagedInstance]) -> String {
    let mut sorted: Vec<&ManagedInstance> = candidates.iter().collect();
    sorted.sort_by(|a, b| {
        (a.container.as_str(), a.instance_id_str(), a.workdir_str()).cmp(&(
            b.container.as_str(),
            b.instance_id_str(),
            b.workdir_str(),
        ))
    });

    sorted
        .iter()
        .map(|c| {
            let parts: Vec<&str> = [c.instance_id_str(), c.container.as_str(), c.workdir_str()]
                .into_iter()
                .filter(|p| !p.is_empty())
                .collect();
            format!("  - {}", parts.join("  "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
