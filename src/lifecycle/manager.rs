use std::sync::Arc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::{
    foundation::error::{ScrollstageError, ScrollstageResult},
    stage::definition::{ResourceSpec, StageConfig, StageDefinition},
    stage::segmenter::StageLocalState,
};

new_key_type! {
    /// Opaque token for one mounted stage resource.
    ///
    /// Generational: once the resource is disposed, the handle never resolves again, even
    /// if its slot is reused.
    pub struct ResourceHandle;
}

/// Per-stage lifecycle.
///
/// `Unmounted -> Mounting -> Active -> Unmounting -> Unmounted`. Mounting is synchronous,
/// so `Mounting` and `Unmounting` are only observable from inside a [`ResourceFactory`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StagePhase {
    /// No resource exists.
    #[default]
    Unmounted,
    /// The factory is creating the resource.
    Mounting,
    /// The resource exists and may be rendered.
    Active,
    /// The factory is disposing the resource.
    Unmounting,
}

/// Creates and disposes the heavy resource behind each stage.
pub trait ResourceFactory {
    /// Resource type owned by the lifecycle manager.
    type Resource;

    /// Build the resource for `stage`. Must complete synchronously.
    fn create(&mut self, stage: &StageDefinition) -> Self::Resource;

    /// Release a resource. The default simply drops it.
    fn dispose(&mut self, stage: usize, resource: Self::Resource) {
        let _ = (stage, resource);
    }
}

/// Default factory: the resource is the stage's own [`ResourceSpec`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SpecFactory;

impl ResourceFactory for SpecFactory {
    type Resource = ResourceSpec;

    fn create(&mut self, stage: &StageDefinition) -> ResourceSpec {
        stage.resource.clone()
    }
}

/// A live handle and the stage that owns it.
///
/// The default value holds the null handle, which never resolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ResourceRef {
    /// Owning stage.
    pub stage: usize,
    /// Handle into the lifecycle manager.
    pub handle: ResourceHandle,
}

/// Resource sets resident after a reconcile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ActiveResources {
    /// Resource of the stage containing the progress.
    pub current: ResourceRef,
    /// The one other resident resource: the stage just left, or a pre-warmed neighbour.
    pub previous: Option<ResourceRef>,
}

/// Handles mounted and disposed by one reconcile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Newly mounted resources, in mount order.
    pub mounted: SmallVec<[ResourceRef; 2]>,
    /// Disposed resources, in dispose order. Their handles are already dead.
    pub disposed: SmallVec<[ResourceRef; 2]>,
}

impl ReconcileReport {
    /// Return `true` when nothing was mounted or disposed.
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty() && self.disposed.is_empty()
    }
}

struct Mounted<R> {
    stage: usize,
    resource: R,
}

/// Sole owner of per-stage resources.
///
/// At most two stages are ever resident: the current one and one neighbour kept alive by
/// the hysteresis margin. Everything else is disposed before anything new is mounted.
pub struct StageLifecycleManager<F: ResourceFactory = SpecFactory> {
    config: Arc<StageConfig>,
    factory: F,
    phases: Vec<StagePhase>,
    handles: Vec<Option<ResourceHandle>>,
    resources: SlotMap<ResourceHandle, Mounted<F::Resource>>,
    current: Option<usize>,
    previous: Option<usize>,
    mount_count: u64,
    dispose_count: u64,
}

impl<F: ResourceFactory> StageLifecycleManager<F> {
    /// Manager for a validated config.
    pub fn new(config: Arc<StageConfig>, factory: F) -> ScrollstageResult<Self> {
        config.validate()?;
        let n = config.stages.len();
        Ok(Self {
            config,
            factory,
            phases: vec![StagePhase::Unmounted; n],
            handles: vec![None; n],
            resources: SlotMap::with_key(),
            current: None,
            previous: None,
            mount_count: 0,
            dispose_count: 0,
        })
    }

    /// Bring resident resources in line with `local`.
    ///
    /// The current stage is always mounted. A second slot holds, in priority order: the
    /// stage that was current before, the stage that already held the slot, or the adjacent
    /// stage whose boundary is nearest, as long as progress lies inside its hysteresis window.
    pub fn reconcile(&mut self, local: &StageLocalState) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let Some(stage) = self.config.stages.get(local.stage_index) else {
            return report;
        };
        let cur = stage.index;
        let p = stage.start + local.local_progress * stage.width();
        let secondary = self.choose_secondary(cur, p);

        let stale: SmallVec<[usize; 4]> = self
            .phases
            .iter()
            .enumerate()
            .filter(|&(i, phase)| {
                *phase != StagePhase::Unmounted && i != cur && Some(i) != secondary
            })
            .map(|(i, _)| i)
            .collect();
        for i in stale {
            if let Some(r) = self.unmount(i) {
                report.disposed.push(r);
            }
        }

        for i in std::iter::once(cur).chain(secondary) {
            if self.phases[i] == StagePhase::Unmounted {
                report.mounted.push(self.mount(i));
            }
        }

        self.current = Some(cur);
        self.previous = secondary;
        debug_assert!(self.resident_count() <= 2);
        report
    }

    fn choose_secondary(&self, cur: usize, p: f64) -> Option<usize> {
        let reachable = |i: usize| {
            let (lo, hi) = self.config.stages[i].reachable_window(self.config.hysteresis);
            lo <= p && p <= hi
        };

        let retained = [self.current, self.previous]
            .into_iter()
            .flatten()
            .find(|&i| i != cur && self.phases[i] != StagePhase::Unmounted && reachable(i));
        if retained.is_some() {
            return retained;
        }

        let stage = &self.config.stages[cur];
        let before = cur
            .checked_sub(1)
            .filter(|&i| reachable(i))
            .map(|i| (p - stage.start, i));
        let after = Some(cur + 1)
            .filter(|&i| i < self.config.stages.len() && reachable(i))
            .map(|i| (stage.end - p, i));

        match (before, after) {
            (Some(b), Some(a)) => Some(if a.0 < b.0 { a.1 } else { b.1 }),
            (b, a) => b.or(a).map(|(_, i)| i),
        }
    }

    fn mount(&mut self, stage: usize) -> ResourceRef {
        self.phases[stage] = StagePhase::Mounting;
        let resource = self.factory.create(&self.config.stages[stage]);
        let handle = self.resources.insert(Mounted { stage, resource });
        self.handles[stage] = Some(handle);
        self.phases[stage] = StagePhase::Active;
        self.mount_count += 1;
        tracing::debug!(stage, ?handle, "mounted stage resource");
        ResourceRef { stage, handle }
    }

    fn unmount(&mut self, stage: usize) -> Option<ResourceRef> {
        self.phases[stage] = StagePhase::Unmounting;
        let handle = self.handles[stage].take();
        let out = handle.and_then(|handle| {
            let mounted = self.resources.remove(handle)?;
            self.factory.dispose(stage, mounted.resource);
            self.dispose_count += 1;
            tracing::debug!(stage, ?handle, "disposed stage resource");
            Some(ResourceRef { stage, handle })
        });
        self.phases[stage] = StagePhase::Unmounted;
        if self.current == Some(stage) {
            self.current = None;
        }
        if self.previous == Some(stage) {
            self.previous = None;
        }
        out
    }

    /// Dispose every resident resource regardless of hysteresis.
    pub fn dispose_all(&mut self) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        for i in 0..self.phases.len() {
            if self.phases[i] != StagePhase::Unmounted
                && let Some(r) = self.unmount(i)
            {
                report.disposed.push(r);
            }
        }
        report
    }

    /// Resources resident after the last reconcile, or `None` before the first one.
    pub fn active(&self) -> Option<ActiveResources> {
        let resident =
            |stage: usize| self.handles[stage].map(|handle| ResourceRef { stage, handle });
        Some(ActiveResources {
            current: resident(self.current?)?,
            previous: self.previous.and_then(resident),
        })
    }

    /// Phase of stage `index`.
    pub fn phase(&self, index: usize) -> Option<StagePhase> {
        self.phases.get(index).copied()
    }

    /// Number of stages not in [`StagePhase::Unmounted`].
    pub fn resident_count(&self) -> usize {
        self.phases
            .iter()
            .filter(|p| **p != StagePhase::Unmounted)
            .count()
    }

    /// Total mounts since construction.
    pub fn mount_count(&self) -> u64 {
        self.mount_count
    }

    /// Total disposals since construction.
    pub fn dispose_count(&self) -> u64 {
        self.dispose_count
    }

    /// Return `true` while `handle` refers to a mounted resource.
    pub fn is_live(&self, handle: ResourceHandle) -> bool {
        self.resources.contains_key(handle)
    }

    /// Resource behind `handle`.
    ///
    /// Dereferencing a disposed handle is a programmer error: it asserts in debug builds and
    /// yields `None` in release builds.
    pub fn resource(&self, handle: ResourceHandle) -> Option<&F::Resource> {
        let found = self.resources.get(handle);
        debug_assert!(found.is_some(), "resource handle {handle:?} was disposed");
        found.map(|m| &m.resource)
    }

    /// Checked variant of [`StageLifecycleManager::resource`].
    pub fn try_resource(&self, handle: ResourceHandle) -> ScrollstageResult<&F::Resource> {
        self.resources
            .get(handle)
            .map(|m| &m.resource)
            .ok_or_else(|| {
                ScrollstageError::lifecycle(format!("resource handle {handle:?} was disposed"))
            })
    }

    /// Stage owning a live handle.
    pub fn stage_of(&self, handle: ResourceHandle) -> Option<usize> {
        self.resources.get(handle).map(|m| m.stage)
    }

    /// Shared factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/manager.rs"]
mod tests;
