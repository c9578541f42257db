//! Field definitions and the named per-node [`FieldStore`].

use indexmap::IndexMap;

use crate::error::FieldError;
use crate::id::FieldId;
use crate::traits::{FieldReader, FieldWriter};

/// Definition of a scalar field registered in a simulation.
///
/// Fields are the fundamental unit of per-node state. Each field holds
/// one `f64` per grid node. Fields are registered at simulation
/// construction; `FieldId` is the index into the registration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    /// Name used for lookup, export headers, and error reporting.
    pub name: String,
    /// Optional unit annotation (e.g., `"m"`, `"m^2"`).
    pub units: Option<String>,
}

impl FieldDef {
    /// Convenience constructor for a named field without units.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            units: None,
        }
    }

    /// Convenience constructor for a named field with a unit annotation.
    pub fn with_units(name: &str, units: &str) -> Self {
        Self {
            name: name.to_string(),
            units: Some(units.to_string()),
        }
    }
}

/// Named per-node scalar field storage.
///
/// Owns one `Vec<f64>` per registered field, all of the same node
/// count. Fields are addressed by [`FieldId`] in hot paths and by name
/// at the configuration and export boundaries. Registration order is
/// preserved (names are kept in an insertion-ordered index), so
/// iteration and export are deterministic.
///
/// # Examples
///
/// ```
/// use scarp_core::{FieldDef, FieldStore, FieldReader};
///
/// let mut store = FieldStore::new(4);
/// let z = store.register(FieldDef::with_units("topographic_elevation", "m")).unwrap();
/// store.set(z, &[0.0, 1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(store.read(z).unwrap()[2], 2.0);
/// assert_eq!(store.id_of("topographic_elevation"), Some(z));
/// ```
#[derive(Clone, Debug)]
pub struct FieldStore {
    node_count: usize,
    defs: Vec<FieldDef>,
    names: IndexMap<String, FieldId>,
    data: Vec<Vec<f64>>,
}

impl FieldStore {
    /// Create an empty store for grids with `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            defs: Vec::new(),
            names: IndexMap::new(),
            data: Vec::new(),
        }
    }

    /// Number of nodes each field buffer covers.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns `true` if no fields are registered.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Register a new field, zero-initialized.
    ///
    /// Returns the assigned [`FieldId`], or an error if the name is
    /// empty or already taken.
    pub fn register(&mut self, def: FieldDef) -> Result<FieldId, FieldError> {
        if def.name.is_empty() {
            return Err(FieldError::EmptyName);
        }
        if self.names.contains_key(&def.name) {
            return Err(FieldError::DuplicateName { name: def.name });
        }
        let id = FieldId(self.defs.len() as u32);
        self.names.insert(def.name.clone(), id);
        self.defs.push(def);
        self.data.push(vec![0.0; self.node_count]);
        Ok(id)
    }

    /// Resolve a field name to its ID.
    pub fn id_of(&self, name: &str) -> Option<FieldId> {
        self.names.get(name).copied()
    }

    /// The definition of a registered field.
    pub fn def(&self, field: FieldId) -> Option<&FieldDef> {
        self.defs.get(field.0 as usize)
    }

    /// Definitions of all registered fields, in registration order.
    pub fn defs(&self) -> &[FieldDef] {
        &self.defs
    }

    /// Whether a field ID is registered in this store.
    pub fn contains(&self, field: FieldId) -> bool {
        (field.0 as usize) < self.defs.len()
    }

    /// Overwrite a field's data from a slice.
    ///
    /// Returns `Err(FieldError::LengthMismatch)` if `values` does not
    /// cover exactly one value per node.
    pub fn set(&mut self, field: FieldId, values: &[f64]) -> Result<(), FieldError> {
        if values.len() != self.node_count {
            return Err(FieldError::LengthMismatch {
                field,
                expected: self.node_count,
                got: values.len(),
            });
        }
        match self.data.get_mut(field.0 as usize) {
            Some(buf) => {
                buf.copy_from_slice(values);
                Ok(())
            }
            None => Err(FieldError::UnknownField {
                name: format!("id {field}"),
            }),
        }
    }

    /// Fill every node of a field with a constant value.
    pub fn fill(&mut self, field: FieldId, value: f64) {
        if let Some(buf) = self.data.get_mut(field.0 as usize) {
            buf.fill(value);
        }
    }

    /// Read a field's data by name.
    pub fn read_by_name(&self, name: &str) -> Result<&[f64], FieldError> {
        let id = self.id_of(name).ok_or_else(|| FieldError::UnknownField {
            name: name.to_string(),
        })?;
        Ok(&self.data[id.0 as usize])
    }

    /// Mutable access to a field's data by name.
    pub fn write_by_name(&mut self, name: &str) -> Result<&mut [f64], FieldError> {
        let id = self.id_of(name).ok_or_else(|| FieldError::UnknownField {
            name: name.to_string(),
        })?;
        Ok(&mut self.data[id.0 as usize])
    }

    /// Iterate `(id, def, data)` for every field in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldDef, &[f64])> {
        self.defs
            .iter()
            .zip(self.data.iter())
            .enumerate()
            .map(|(i, (def, data))| (FieldId(i as u32), def, data.as_slice()))
    }
}

impl FieldReader for FieldStore {
    fn read(&self, field: FieldId) -> Option<&[f64]> {
        self.data.get(field.0 as usize).map(|v| v.as_slice())
    }
}

impl FieldWriter for FieldStore {
    fn write(&mut self, field: FieldId) -> Option<&mut [f64]> {
        self.data.get_mut(field.0 as usize).map(|v| v.as_mut_slice())
    }
}
