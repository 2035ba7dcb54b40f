//! Embedded Sample Rows
//!
//! Shown in the drill-down modals when a list cannot be loaded and the
//! fallback policy allows it.

use super::lookup::{list, LookupItem};

/// Sample rows for a tree level; lists without samples return nothing
pub fn sample_rows(list_name: &str) -> Vec<LookupItem> {
    let rows: &[(&str, &str, &str)] = match list_name {
        list::CLASIFICACIONES => &[
            ("1", "APC - ÁREA DE PRESUPUESTOS Y CONEXIONES", "APC"),
            ("2", "C - CONSULTAS", "C"),
        ],
        list::TIPOS => &[("1", "M - MASIVOS", "M"), ("2", "R - RUTINA", "R")],
        list::SUBTIPOS => &[
            ("1", "1 - ENTREGA DE DOCUMENTOS EN INFORMACION", "1"),
            ("2", "2 - INSPECCIÓN DE LOTESICASTASTROI", "2"),
            ("3", "3 - ENTREGA Y PAGO DE PPTOS", "3"),
        ],
        list::SETS => &[
            ("1", "SET 001 - Zona Norte", "SET001"),
            ("2", "SET 002 - Zona Sur", "SET002"),
            ("3", "SET 003 - Zona Centro", "SET003"),
        ],
        list::ALIMENTACIONES => &[
            ("1", "ALIM 001 - Alimentador Principal", "ALIM001"),
            ("2", "ALIM 002 - Alimentador Secundario", "ALIM002"),
            ("3", "ALIM 003 - Alimentador de Respaldo", "ALIM003"),
        ],
        _ => &[],
    };
    rows.iter()
        .map(|(code, label, alt)| LookupItem::with_alt(*code, *label, *alt))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tree_level_has_samples() {
        for name in [
            list::CLASIFICACIONES,
            list::TIPOS,
            list::SUBTIPOS,
            list::SETS,
            list::ALIMENTACIONES,
        ] {
            assert!(!sample_rows(name).is_empty(), "{}", name);
        }
        assert!(sample_rows(list::DISTRITOS).is_empty());
    }
}
