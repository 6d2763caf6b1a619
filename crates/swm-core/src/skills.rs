//! Skill trait and registry used to expose the knowledge layer to a dispatcher.

use async_trait::async_trait;
use std::sync::Arc;

pub type SkillError = Box<dyn std::error::Error + Send + Sync>;

/// A named operation that takes an optional JSON payload and returns JSON.
#[async_trait]
pub trait AgentSkill: Send + Sync {
    /// Unique skill name for routing.
    fn name(&self) -> &str;

    async fn execute(
        &self,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, SkillError>;
}

/// Registry of agent skills that can be dispatched by name.
pub struct SkillRegistry {
    skills: Vec<Arc<dyn AgentSkill>>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self { skills: Vec::new() }
    }

    /// Adds a skill. Lookups return the first skill registered under a name.
    pub fn register(&mut self, skill: Arc<dyn AgentSkill>) {
        if self.get(skill.name()).is_some() {
            tracing::warn!(target: "swm::skills", skill = skill.name(), "Duplicate skill name ignored on lookup");
        }
        self.skills.push(skill);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn AgentSkill>> {
        self.skills.iter().find(|s| s.name() == name).cloned()
    }

    /// Returns the names of all registered skills.
    pub fn skill_names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name().to_string()).collect()
    }

    pub async fn dispatch(
        &self,
        name: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, SkillError> {
        let skill = self
            .get(name)
            .ok_or_else(|| format!("unknown skill: {}", name))?;
        tracing::debug!(target: "swm::skills", skill = name, "Dispatching skill");
        skill.execute(payload).await
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl AgentSkill for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn execute(
            &self,
            payload: Option<serde_json::Value>,
        ) -> Result<serde_json::Value, SkillError> {
            Ok(payload.unwrap_or(serde_json::Value::Null))
        }
    }

    #[tokio::test]
    async fn dispatch_routes_by_name() {
        let mut registry = SkillRegistry::new();
        registry.register(Arc::new(Echo));
        assert_eq!(registry.skill_names(), vec!["echo"]);
        let out = registry.dispatch("echo", Some(json!({ "a": 1 }))).await.unwrap();
        assert_eq!(out, json!({ "a": 1 }));
        assert!(registry.dispatch("missing", None).await.is_err());
    }
}
