//! Lookup Lists
//!
//! Combo-box data served by the parameter endpoint.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// List names understood by the parameter endpoint
pub mod list {
    // Datos de llamada
    pub const TIPO_ID_LLAMADA: &str = "TipoIdLlamada";
    pub const DESCRIPCIONES: &str = "Descripciones";
    pub const DISTRITOS: &str = "Distritos";
    pub const ZONA_LLAMADA: &str = "ZonaLlamada";
    pub const TIPO_ORIGEN_LLAMADA: &str = "TipoOrigenLLamada";
    pub const SUCURSALES: &str = "Sucursales";
    pub const CENTRO_DE_SERVICIO: &str = "CentroDeServicio";
    pub const FECHA_LLAMADA: &str = "FechaLlamada";
    // Datos del predio
    pub const CLASIFICACIONES: &str = "Clasificaciones";
    pub const TIPOS: &str = "Tipos";
    pub const SUBTIPOS: &str = "SubTipos";
    pub const ESTADOS: &str = "Estados";
    // Datos eléctricos
    pub const SETS: &str = "Sets";
    pub const ALIMENTACIONES: &str = "Alimentaciones";
}

/// A (code, label, alt) row for a combo box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupItem {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descripcion")]
    pub label: String,
    #[serde(rename = "valorAlf", default)]
    pub alt_value: Option<String>,
}

impl LookupItem {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            alt_value: None,
        }
    }

    pub fn with_alt(code: impl Into<String>, label: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            alt_value: Some(alt.into()),
        }
    }
}

/// Which lists to fetch: `0` = whole list, `n > 0` = children of node `n`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LookupRequest(BTreeMap<String, i64>);

impl LookupRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the top-level list
    pub fn all(mut self, name: &str) -> Self {
        self.0.insert(name.to_string(), 0);
        self
    }

    /// Request the children of `parent_id`
    pub fn children(mut self, name: &str, parent_id: i64) -> Self {
        self.0.insert(name.to_string(), parent_id);
        self
    }

    /// Children request keyed by a node code. Codes are numeric on the wire;
    /// anything else is rejected before a request goes out.
    pub fn children_of(name: &str, parent_code: &str) -> Option<Self> {
        let parent_id = parent_code.trim().parse::<i64>().ok()?;
        Some(Self::new().children(name, parent_id))
    }

    /// Lists shown on the home screen
    pub fn initial() -> Self {
        Self::new()
            .all(list::TIPO_ID_LLAMADA)
            .all(list::DISTRITOS)
            .all(list::SUCURSALES)
    }

    /// Every list the advanced filter modal populates
    pub fn advanced_filter() -> Self {
        Self::new()
            .all(list::TIPO_ID_LLAMADA)
            .all(list::DESCRIPCIONES)
            .all(list::DISTRITOS)
            .all(list::ZONA_LLAMADA)
            .all(list::TIPO_ORIGEN_LLAMADA)
            .all(list::SUCURSALES)
            .all(list::CENTRO_DE_SERVICIO)
            .all(list::FECHA_LLAMADA)
            .all(list::CLASIFICACIONES)
            .all(list::TIPOS)
            .all(list::SUBTIPOS)
            .all(list::ESTADOS)
            .all(list::SETS)
            .all(list::ALIMENTACIONES)
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lists keyed by name, as returned in `entidad`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupBundle(HashMap<String, Vec<LookupItem>>);

impl LookupBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, items: Vec<LookupItem>) {
        self.0.insert(name.to_string(), items);
    }

    /// Borrow a list; missing lists read as empty
    pub fn get(&self, name: &str) -> &[LookupItem] {
        self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Move a list out of the bundle
    pub fn take(&mut self, name: &str) -> Vec<LookupItem> {
        self.0.remove(name).unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, Vec<LookupItem>>> for LookupBundle {
    fn from(map: HashMap<String, Vec<LookupItem>>) -> Self {
        Self(map)
    }
}

/// Find the label for `code` in `items`
pub(crate) fn label_of<'a>(items: &'a [LookupItem], code: &str) -> Option<&'a str> {
    items.iter().find(|i| i.code == code).map(|i| i.label.as_str())
}
