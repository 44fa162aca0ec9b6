use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One file's support for one detected license.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub path: String,
    /// Scanner confidence, 0–100.
    pub score: f64,
    /// Set by hand in an exported tree when the file was patched locally.
    #[serde(default)]
    pub modified: bool,
}

impl Observation {
    pub fn new(path: impl Into<String>, score: f64) -> Self {
        Self {
            path: path.into(),
            score,
            modified: false,
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.modified {
            "🖊️"
        } else if self.score == 100.0 {
            "✅"
        } else {
            "⚠️"
        }
    }
}

/// String-keyed map that keeps first-insertion order, also through JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Mutable access to `key`'s value, inserting `V::default()` at the end
    /// if it is new.
    pub fn entry_or_default(&mut self, key: &str) -> &mut V
    where
        V: Default,
    {
        let pos = match self.entries.iter().position(|(k, _)| k == key) {
            Some(pos) => pos,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with string keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Detected license → supporting observations.
pub type LicenseBucket = OrderedMap<Vec<Observation>>;

/// Evidence gathered for one library, split by where it was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryEvidence {
    /// Top-level LICENSE / LICENCE / COPYRIGHT files.
    #[serde(rename = "LicenseFiles", default)]
    pub license_files: LicenseBucket,
    /// Top-level README files.
    #[serde(rename = "ReadmeFiles", default)]
    pub readme_files: LicenseBucket,
    /// C/C++ sources and headers.
    #[serde(rename = "OtherFiles", default)]
    pub other_files: LicenseBucket,
}

impl LibraryEvidence {
    pub fn bucket_mut(&mut self, kind: BucketKind) -> &mut LicenseBucket {
        match kind {
            BucketKind::License => &mut self.license_files,
            BucketKind::Readme => &mut self.readme_files,
            BucketKind::Other => &mut self.other_files,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    License,
    Readme,
    Other,
}

/// Library name → evidence, in scan order.
pub type LicenseTree = OrderedMap<LibraryEvidence>;
