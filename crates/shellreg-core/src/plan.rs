//! Install plans
//!
//! A plan is the exact list of key store calls an install (or uninstall)
//! performs, grouped into stages. Stages run in order. A sequential stage
//! is a single task; a concurrent stage is a set of tasks with no ordering
//! between them, joined before the next stage starts. Every task runs its
//! operations strictly in order and stops at the first failure.

use futures::future::try_join_all;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::keystore::{KeyOp, KeyStore};

/// Ordered operations that depend on each other
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub label: String,
    pub ops: Vec<KeyOp>,
}

impl Task {
    pub fn new(label: impl Into<String>, ops: Vec<KeyOp>) -> Self {
        Self {
            label: label.into(),
            ops,
        }
    }

    async fn run(&self, store: &dyn KeyStore) -> Result<()> {
        debug!("task {} ({} ops)", self.label, self.ops.len());
        for op in &self.ops {
            op.apply(store).await?;
        }
        Ok(())
    }
}

/// One step of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Stage {
    Sequential(Task),
    Concurrent { label: String, tasks: Vec<Task> },
}

impl Stage {
    pub fn label(&self) -> &str {
        match self {
            Self::Sequential(task) => &task.label,
            Self::Concurrent { label, .. } => label,
        }
    }

    /// Tasks of the stage; a sequential stage has exactly one
    pub fn tasks(&self) -> &[Task] {
        match self {
            Self::Sequential(task) => std::slice::from_ref(task),
            Self::Concurrent { tasks, .. } => tasks,
        }
    }

    async fn run(&self, store: &dyn KeyStore) -> Result<()> {
        match self {
            Self::Sequential(task) => task.run(store).await,
            Self::Concurrent { tasks, .. } => {
                try_join_all(tasks.iter().map(|task| task.run(store))).await?;
                Ok(())
            }
        }
    }
}

/// Staged key store calls for one ProgId
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    pub prog_id: String,
    pub stages: Vec<Stage>,
}

impl InstallPlan {
    pub fn new(prog_id: impl Into<String>) -> Self {
        Self {
            prog_id: prog_id.into(),
            stages: Vec::new(),
        }
    }

    /// Append a stage; concurrent stages without tasks are dropped
    pub fn push(&mut self, stage: Stage) {
        if let Stage::Concurrent { tasks, .. } = &stage {
            if tasks.is_empty() {
                return;
            }
        }
        self.stages.push(stage);
    }

    /// All operations in declaration order
    pub fn ops(&self) -> impl Iterator<Item = &KeyOp> {
        self.stages
            .iter()
            .flat_map(|stage| stage.tasks())
            .flat_map(|task| task.ops.iter())
    }

    pub fn op_count(&self) -> usize {
        self.ops().count()
    }

    /// Run every stage against `store`, surfacing the first failure
    pub async fn execute(&self, store: &dyn KeyStore) -> Result<()> {
        for stage in &self.stages {
            debug!("{}: stage {}", self.prog_id, stage.label());
            stage.run(store).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keystore::{KeyOpKind, KeyPath, MemoryKeyStore, DEFAULT_VALUE};
    use crate::types::Hive;

    fn key(name: &str) -> KeyPath {
        KeyPath::classes(Hive::CurrentUser, name)
    }

    fn sample_plan() -> InstallPlan {
        let mut plan = InstallPlan::new("Foo");
        plan.push(Stage::Sequential(Task::new(
            "Foo",
            vec![
                KeyOp::create(key("Foo")),
                KeyOp::set(key("Foo"), DEFAULT_VALUE, "Foo File"),
            ],
        )));
        plan.push(Stage::Concurrent {
            label: "extensions".into(),
            tasks: vec![
                Task::new(".a", vec![KeyOp::create(key(".a"))]),
                Task::new(".b", vec![KeyOp::create(key(".b"))]),
            ],
        });
        plan.push(Stage::Concurrent {
            label: "empty".into(),
            tasks: Vec::new(),
        });
        plan
    }

    #[test]
    fn test_empty_concurrent_stage_is_dropped() {
        let plan = sample_plan();
        assert_eq!(plan.stages.len(), 2);
        assert_eq!(plan.op_count(), 4);
    }

    #[tokio::test]
    async fn test_execute_applies_all_ops() {
        let store = MemoryKeyStore::new();
        sample_plan().execute(&store).await.unwrap();

        assert_eq!(store.call_count(), 4);
        assert!(store.contains_key(&key(".a")));
        assert!(store.contains_key(&key(".b")));
        assert_eq!(
            store.string_value(&key("Foo"), DEFAULT_VALUE).as_deref(),
            Some("Foo File")
        );
    }

    #[tokio::test]
    async fn test_failure_aborts_later_stages() {
        let store = MemoryKeyStore::new();
        store.fail_on(KeyOpKind::Set, "foo");

        let err = sample_plan().execute(&store).await.unwrap_err();
        assert!(err.is_key_store());
        assert!(err.to_string().contains(r"HKCU\Software\Classes\Foo"));
        assert!(!store.contains_key(&key(".a")));
        assert_eq!(store.call_count(), 2);
    }

    #[test]
    fn test_plan_serializes_stage_mode() {
        let json = serde_json::to_value(sample_plan()).unwrap();
        assert_eq!(json["stages"][0]["mode"], "sequential");
        assert_eq!(json["stages"][1]["mode"], "concurrent");
        assert_eq!(json["stages"][1]["tasks"][0]["label"], ".a");
    }
}
