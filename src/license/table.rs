use crate::config::RelationPair;

/// Curated `(outer, inner)` inclusion facts, applied in this order.
///
/// Several pairs appear in both directions on purpose: inclusion follows
/// stored edges only, so mutually equivalent licenses need both.
pub const CURATED_RELATIONS: &[(&str, &str)] = &[
    ("LicenseRef-scancode-public-domain", "Unlicense"),
    ("LicenseRef-scancode-public-domain", "LicenseRef-scancode-openwall-md5-permissive"),
    ("LicenseRef-scancode-openwall-md5-permissive", "Unlicense"),
    ("Unlicense", "ISC"),
    ("ISC", "LicenseRef-scancode-ugui"),
    ("LicenseRef-scancode-ugui", "ISC"),
    ("MIT", "LicenseRef-scancode-ugui"),
    ("LicenseRef-scancode-ugui", "MIT"),
    ("MIT", "X11"),
    ("X11", "MIT"),
    ("X11", "BSD-2-Clause"),
    ("BSD-3-Clause", "BSD-4-Clause"),
    ("BSD-3-Clause", "Apache-2.0"),
    ("BSD-3-Clause", "MPL-1.1"),
    ("BSD-3-Clause", "LGPL-2.0-or-later"),
    ("BSD-2-Clause", "FTL"),
    ("FTL", "BSD-3-Clause"),
    ("Apache-2.0", "MPL-2.0-no-copyleft-exception"),
    ("Apache-2.0", "LGPL-3.0-or-later"),
    ("Apache-2.0", "MPL-2.0"),
    ("MPL-1.1", "MPL-2.0-no-copyleft-exception"),
    ("MPL-2.0", "LGPL-2.1-or-later"),
    ("LGPL-2.0-or-later", "LGPL-2.1-or-later"),
    ("LGPL-2.0-or-later", "LGPL-2.0-only"),
    ("LGPL-2.1-or-later", "LGPL-3.0-or-later"),
    ("LGPL-2.1-or-later", "LGPL-2.1-only"),
    ("LGPL-2.1-only", "GPL-2.0-or-later"),
    ("LGPL-2.0-only", "GPL-2.0-or-later"),
    ("LGPL-3.0-only", "GPL-3.0-or-later"),
    ("LGPL-3.0-or-later", "LGPL-3.0-only"),
    ("GPL-1.0-or-later", "GPL-2.0-or-later"),
    ("GPL-1.0-or-later", "GPL-1.0-only"),
    ("GPL-2.0-or-later", "GPL-2.0-only"),
    ("GPL-2.0-or-later", "GPL-3.0-or-later"),
    ("GPL-3.0-or-later", "GPL-3.0-only"),
    ("GPL-3.0-only", "AGPL-3.0-or-later"),
    ("AGPL-3.0-or-later", "AGPL-3.0-only"),
];

/// Immutable, ordered list of `(outer, inner)` pairs a graph is built from.
#[derive(Debug, Clone)]
pub struct RelationTable {
    pairs: Vec<(String, String)>,
}

impl RelationTable {
    /// The curated table alone.
    pub fn curated() -> Self {
        Self {
            pairs: CURATED_RELATIONS
                .iter()
                .map(|(outer, inner)| (outer.to_string(), inner.to_string()))
                .collect(),
        }
    }

    /// The curated table followed by user-supplied pairs.
    pub fn with_extra(extra: &[RelationPair]) -> Self {
        let mut table = Self::curated();
        table
            .pairs
            .extend(extra.iter().map(|p| (p.outer.clone(), p.inner.clone())));
        table
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(o, i)| (o.as_str(), i.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}
