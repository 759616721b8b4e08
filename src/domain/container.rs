use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ContainerName, ContainerState};

/// A container listed by the manager: either backed by a compose template,
/// present in the engine, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub name: ContainerName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub state: ContainerState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ContainerInfo {
    /// Entry for a compose template with no engine container yet.
    pub fn from_template(name: ContainerName, template_dir: PathBuf) -> Self {
        Self {
            name,
            template_dir: Some(template_dir),
            id: None,
            image: None,
            state: ContainerState::NotInstalled,
            status: None,
        }
    }

    pub fn is_installable(&self) -> bool {
        self.template_dir.is_some()
    }
}

/// A container as the engine reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineContainer {
    pub id: String,
    pub name: ContainerName,
    pub image: String,
    pub state: ContainerState,
    pub status: String,
}

/// All known containers keyed by name, ordered for stable listings.
#[derive(Debug, Clone, Default)]
pub struct ContainerMap {
    entries: BTreeMap<ContainerName, ContainerInfo>,
}

impl ContainerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: ContainerInfo) {
        self.entries.insert(info.name.clone(), info);
    }

    pub fn get(&self, name: &ContainerName) -> Option<&ContainerInfo> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &ContainerInfo> {
        self.entries.values()
    }

    /// Merge the engine's view into the map.
    ///
    /// Engine data overwrites id, image, state and status of an existing
    /// entry; template information is kept. Engine containers without a
    /// template are added. Template entries the engine no longer knows
    /// about fall back to `NotInstalled`; engine-only entries it no longer
    /// reports are dropped.
    pub fn merge_engine(&mut self, engine: Vec<EngineContainer>) {
        for info in self.entries.values_mut() {
            info.id = None;
            info.image = None;
            info.state = ContainerState::NotInstalled;
            info.status = None;
        }

        for ctr in engine {
            let entry = self
                .entries
                .entry(ctr.name.clone())
                .or_insert_with(|| ContainerInfo {
                    name: ctr.name.clone(),
                    template_dir: None,
                    id: None,
                    image: None,
                    state: ContainerState::NotInstalled,
                    status: None,
                });
            entry.id = Some(ctr.id);
            entry.image = Some(ctr.image);
            entry.state = ctr.state;
            entry.status = Some(ctr.status);
        }

        // Engine-only containers that disappeared are dropped
        self.entries
            .retain(|_, info| info.template_dir.is_some() || info.id.is_some());
    }

    pub fn set_state(&mut self, name: &ContainerName, state: ContainerState) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.state = state;
        }
    }
}

impl FromIterator<ContainerInfo> for ContainerMap {
    fn from_iter<I: IntoIterator<Item = ContainerInfo>>(iter: I) -> Self {
        let mut map = Self::new();
        for info in iter {
            map.insert(info);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ContainerName {
        ContainerName::new(s).unwrap()
    }

    fn engine(n: &str, state: ContainerState) -> EngineContainer {
        EngineContainer {
            id: format!("id-{}", n),
            name: name(n),
            image: format!("{}:latest", n),
            state,
            status: "Up 2 minutes".into(),
        }
    }

    #[test]
    fn test_merge_keeps_template_and_adds_engine_data() {
        let mut map: ContainerMap = [ContainerInfo::from_template(
            name("nginx"),
            PathBuf::from("/templates/nginx"),
        )]
        .into_iter()
        .collect();

        map.merge_engine(vec![engine("nginx", ContainerState::Running)]);

        let info = map.get(&name("nginx")).unwrap();
        assert_eq!(info.template_dir, Some(PathBuf::from("/templates/nginx")));
        assert_eq!(info.id.as_deref(), Some("id-nginx"));
        assert_eq!(info.state, ContainerState::Running);
    }

    #[test]
    fn test_merge_adds_engine_only_containers() {
        let mut map = ContainerMap::new();
        map.merge_engine(vec![engine("redis", ContainerState::Exited)]);

        let info = map.get(&name("redis")).unwrap();
        assert!(!info.is_installable());
        assert_eq!(info.state, ContainerState::Exited);
    }

    #[test]
    fn test_template_without_container_is_not_installed() {
        let mut map: ContainerMap = [ContainerInfo::from_template(
            name("grafana"),
            PathBuf::from("/templates/grafana"),
        )]
        .into_iter()
        .collect();

        map.merge_engine(vec![engine("redis", ContainerState::Running)]);

        assert_eq!(
            map.get(&name("grafana")).unwrap().state,
            ContainerState::NotInstalled
        );
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_remerge_drops_removed_engine_containers() {
        let mut map = ContainerMap::new();
        map.merge_engine(vec![engine("redis", ContainerState::Running)]);
        map.merge_engine(vec![]);
        assert!(map.is_empty());
    }

    #[test]
    fn test_remerge_keeps_templates_and_drops_stale_engine_entries() {
        let mut map: ContainerMap = [ContainerInfo::from_template(
            name("grafana"),
            PathBuf::from("/templates/grafana"),
        )]
        .into_iter()
        .collect();
        map.merge_engine(vec![
            engine("grafana", ContainerState::Running),
            engine("redis", ContainerState::Running),
        ]);
        assert_eq!(map.len(), 2);

        map.merge_engine(vec![engine("grafana", ContainerState::Exited)]);

        assert_eq!(map.len(), 1);
        assert!(map.get(&name("redis")).is_none());
        let grafana = map.get(&name("grafana")).unwrap();
        assert_eq!(grafana.state, ContainerState::Exited);
        assert!(grafana.template_dir.is_some());
    }
}
