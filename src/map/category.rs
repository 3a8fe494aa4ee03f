/// The kind of a placed map object, selected by the first field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectCategory {
    /// Textured primitive geometry (cuboids, cylinders, statues, ...)
    Custom,
    /// Racing checkpoints, start and finish volumes
    Racing,
    /// Player and titan spawn points
    SpawnPoint,
    /// Networked event objects such as titan spawners
    Photon,
    /// Barriers and other invisible helpers
    Misc,
    /// Named trigger volume, stored on disk as `misc,region`
    Region,
    /// Objects from the vanilla map
    Base,
}

impl ObjectCategory {
    /// Resolve the category for a record keyword and object name.
    pub fn from_keyword(keyword: &str, name: &str) -> Option<Self> {
        match keyword {
            "custom" => Some(ObjectCategory::Custom),
            "racing" => Some(ObjectCategory::Racing),
            "spawnpoint" => Some(ObjectCategory::SpawnPoint),
            "photon" => Some(ObjectCategory::Photon),
            "misc" if name == "region" => Some(ObjectCategory::Region),
            "misc" => Some(ObjectCategory::Misc),
            "region" => Some(ObjectCategory::Region),
            "base" => Some(ObjectCategory::Base),
            _ => None,
        }
    }

    /// The keyword written as the first field of a record
    pub fn keyword(&self) -> &'static str {
        match self {
            ObjectCategory::Custom => "custom",
            ObjectCategory::Racing => "racing",
            ObjectCategory::SpawnPoint => "spawnpoint",
            ObjectCategory::Photon => "photon",
            ObjectCategory::Misc | ObjectCategory::Region => "misc",
            ObjectCategory::Base => "base",
        }
    }
}
