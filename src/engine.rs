//! The engine handle.
//!
//! Scenes are bound to an [`Engine`] that is passed in explicitly. The handle is
//! cheap to clone and does not need a GPU, so scenes can be built headless and
//! uploaded later by the renderer.

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use crate::config::BuildInfo;

#[derive(Debug, Default)]
struct EngineInner {
    build: BuildInfo,
    next_scene_id: AtomicU32,
}

#[derive(Clone, Debug, Default)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_build_info(BuildInfo::default())
    }

    pub fn with_build_info(build: BuildInfo) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                build,
                next_scene_id: AtomicU32::new(0),
            }),
        }
    }

    pub fn build_info(&self) -> BuildInfo {
        self.inner.build
    }

    pub(crate) fn allocate_scene_id(&self) -> u32 {
        self.inner.next_scene_id.fetch_add(1, Ordering::Relaxed)
    }
}
