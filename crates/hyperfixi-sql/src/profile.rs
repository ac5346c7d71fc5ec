//! Per-language profiles (spec §4.3): keyword translations and a word-order
//! class that together let the pattern matcher read the same schema table
//! against source text in different languages.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOrder {
    Svo,
    Sov,
    Vso,
}

pub struct Profile {
    pub language_code: &'static str,
    pub word_order: WordOrder,
    /// Canonical action name (e.g. `create-table`) -> localized keyword.
    /// Compound commands stay single tokens: hyphenated in Latin/Arabic
    /// scripts, concatenated in CJK.
    pub keywords: HashMap<&'static str, &'static str>,
    /// Canonical marker name (e.g. `to`, `on`, `column`, `type`) -> localized
    /// preposition/postposition token.
    pub markers: HashMap<&'static str, &'static str>,
}

fn table(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    pairs.iter().copied().collect()
}

pub fn english() -> Profile {
    Profile {
        language_code: "en",
        word_order: WordOrder::Svo,
        keywords: table(&[
            ("create-table", "create-table"),
            ("drop-table", "drop-table"),
            ("rename-table", "rename-table"),
            ("add-column", "add-column"),
            ("drop-column", "drop-column"),
            ("create-index", "create-index"),
            ("drop-index", "drop-index"),
        ]),
        markers: table(&[("to", "to"), ("on", "on"), ("column", "column"), ("type", "type")]),
    }
}

pub fn spanish() -> Profile {
    Profile {
        language_code: "es",
        word_order: WordOrder::Svo,
        keywords: table(&[
            ("create-table", "crear-tabla"),
            ("drop-table", "eliminar-tabla"),
            ("rename-table", "renombrar-tabla"),
            ("add-column", "agregar-columna"),
            ("drop-column", "eliminar-columna"),
            ("create-index", "crear-indice"),
            ("drop-index", "eliminar-indice"),
        ]),
        markers: table(&[("to", "a"), ("on", "en"), ("column", "columna"), ("type", "tipo")]),
    }
}

pub fn japanese() -> Profile {
    Profile {
        language_code: "ja",
        word_order: WordOrder::Sov,
        keywords: table(&[
            ("create-table", "テーブル作成"),
            ("drop-table", "テーブル削除"),
            ("rename-table", "テーブル名変更"),
            ("add-column", "カラム追加"),
            ("drop-column", "カラム削除"),
            ("create-index", "インデックス作成"),
            ("drop-index", "インデックス削除"),
        ]),
        markers: table(&[("to", "へ"), ("on", "の"), ("column", "カラム"), ("type", "型")]),
    }
}

pub fn arabic() -> Profile {
    Profile {
        language_code: "ar",
        word_order: WordOrder::Vso,
        keywords: table(&[
            ("create-table", "انشئ-جدول"),
            ("drop-table", "احذف-جدول"),
            ("rename-table", "اعد-تسمية-جدول"),
            ("add-column", "اضف-عمود"),
            ("drop-column", "احذف-عمود"),
            ("create-index", "انشئ-فهرس"),
            ("drop-index", "احذف-فهرس"),
        ]),
        markers: table(&[("to", "الى"), ("on", "في"), ("column", "عمود"), ("type", "نوع")]),
    }
}

/// Looks up a registered profile by BCP-47-ish language code; `None` for an
/// unsupported locale.
pub fn lookup(language_code: &str) -> Option<Profile> {
    match language_code {
        "en" => Some(english()),
        "es" => Some(spanish()),
        "ja" => Some(japanese()),
        "ar" => Some(arabic()),
        _ => None,
    }
}
