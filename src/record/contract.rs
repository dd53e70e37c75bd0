use serde::{Deserialize, Serialize};

use super::amount::{coerce_amount, raw_amount};
use super::{DEFAULT_AI_CATEGORY, DEFAULT_SECTOR, DEFAULT_YEAR, NOT_AVAILABLE};
use crate::types::identifiers::ContractId;

/// A scalar as it appears in the dataset document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Objects and arrays; read as absent.
    Other(serde_json::Value),
}

impl FieldValue {
    /// Trimmed textual reading; `None` when the value is blank.
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            FieldValue::Text(s) => s.trim().to_string(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Other(_) => return None,
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n == 1.0,
            FieldValue::Text(s) => {
                let s = s.trim();
                s == "1" || s.eq_ignore_ascii_case("true")
            }
            FieldValue::Other(_) => false,
        }
    }
}

/// One contract object of the dataset document, exactly as loaded.
///
/// Both the snake_case export keys and the uppercase dashboard keys are
/// accepted. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawContract {
    #[serde(alias = "CIG")]
    pub cig: Option<FieldValue>,
    #[serde(
        alias = "DENOMINAZIONE_AMMINISTRAZIONE",
        alias = "DENOMINAZIONE_AMMINISTRAZIONE_APPALTANTE"
    )]
    pub denominazione_amministrazione_appaltante: Option<FieldValue>,
    #[serde(alias = "CF_AMMINISTRAZIONE_APPALTANTE")]
    pub cf_amministrazione_appaltante: Option<FieldValue>,
    #[serde(alias = "COD_ISTAT_PROVINCIA_SEDE", alias = "PROVINCIA")]
    pub provincia: Option<FieldValue>,
    #[serde(alias = "OGGETTO_LOTTO")]
    pub oggetto_lotto: Option<FieldValue>,
    #[serde(alias = "OGGETTO_GARA")]
    pub oggetto_gara: Option<FieldValue>,
    pub categoria_ai: Option<FieldValue>,
    pub settore_pa: Option<FieldValue>,
    #[serde(alias = "IMPORTO_COMPLESSIVO_GARA")]
    pub importo_complessivo_gara: Option<FieldValue>,
    #[serde(alias = "IMPORTO_LOTTO")]
    pub importo_lotto: Option<FieldValue>,
    #[serde(alias = "ANNO_PUBBLICAZIONE")]
    pub anno_pubblicazione: Option<FieldValue>,
    pub is_pnrr: Option<FieldValue>,
    #[serde(alias = "OGGETTO_PRINCIPALE_CONTRATTO")]
    pub oggetto_principale_contratto: Option<FieldValue>,
    #[serde(alias = "COD_CPV")]
    pub cod_cpv: Option<FieldValue>,
    #[serde(alias = "DESCRIZIONE_CPV")]
    pub descrizione_cpv: Option<FieldValue>,
    #[serde(alias = "DATA_PUBBLICAZIONE")]
    pub data_pubblicazione: Option<FieldValue>,
    #[serde(alias = "STATO")]
    pub stato: Option<FieldValue>,
    #[serde(alias = "N_LOTTI_COMPONENTI")]
    pub n_lotti_componenti: Option<FieldValue>,
    #[serde(alias = "TIPO_APPALTO_RISERVATO")]
    pub tipo_appalto_riservato: Option<FieldValue>,
}

/// Data-shape problems seen while normalizing a single record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordIssues {
    pub missing_id: bool,
    pub missing_object: bool,
    pub missing_amount: bool,
    pub zero_amount: bool,
    pub negative_amount: bool,
    pub missing_administration: bool,
}

impl RecordIssues {
    /// Re-evaluate the amount flags against a corrected lot amount.
    pub fn with_corrected_amount(self, lot_amount: f64) -> Self {
        Self {
            missing_amount: false,
            zero_amount: lot_amount == 0.0,
            negative_amount: lot_amount < 0.0,
            ..self
        }
    }
}

/// A normalized contract: every field holds a value, amounts are finite
/// and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractRecord {
    pub id: ContractId,
    pub administration_name: String,
    pub administration_code: String,
    pub province: String,
    pub lot_object: String,
    pub gazette_object: String,
    pub ai_category: String,
    pub sector: String,
    pub gross_amount: f64,
    pub lot_amount: f64,
    pub year: String,
    pub is_pnrr: bool,
    pub contract_type: String,
    pub cpv_code: String,
    pub cpv_description: String,
    pub publication_date: String,
    pub status: String,
    pub lot_count: String,
    pub reserved_type: String,
}

fn text_or(value: Option<&FieldValue>, fallback: &str) -> String {
    value
        .and_then(FieldValue::as_text)
        .unwrap_or_else(|| fallback.to_string())
}

impl ContractRecord {
    /// Normalize a raw contract. Never fails: gaps become sentinels.
    pub fn from_raw(raw: &RawContract) -> (Self, RecordIssues) {
        let id_text = raw.cig.as_ref().and_then(FieldValue::as_text);
        let name_text = raw
            .denominazione_amministrazione_appaltante
            .as_ref()
            .and_then(FieldValue::as_text);
        let lot_object = raw.oggetto_lotto.as_ref().and_then(FieldValue::as_text);
        let gazette_object = raw.oggetto_gara.as_ref().and_then(FieldValue::as_text);
        let signed_lot_amount = raw_amount(raw.importo_lotto.as_ref());

        let issues = RecordIssues {
            missing_id: id_text.is_none(),
            missing_object: lot_object.is_none() && gazette_object.is_none(),
            missing_amount: signed_lot_amount.is_none(),
            zero_amount: signed_lot_amount == Some(0.0),
            negative_amount: signed_lot_amount.map_or(false, |n| n < 0.0),
            missing_administration: name_text.is_none(),
        };

        let province = raw
            .provincia
            .as_ref()
            .and_then(FieldValue::as_text)
            .map(|p| p.to_uppercase())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let record = ContractRecord {
            id: ContractId::new(id_text.unwrap_or_default()),
            administration_name: name_text.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            administration_code: text_or(
                raw.cf_amministrazione_appaltante.as_ref(),
                NOT_AVAILABLE,
            ),
            province,
            lot_object: lot_object.unwrap_or_default(),
            gazette_object: gazette_object.unwrap_or_default(),
            ai_category: text_or(raw.categoria_ai.as_ref(), DEFAULT_AI_CATEGORY),
            sector: text_or(raw.settore_pa.as_ref(), DEFAULT_SECTOR),
            gross_amount: coerce_amount(raw.importo_complessivo_gara.as_ref()),
            lot_amount: coerce_amount(raw.importo_lotto.as_ref()),
            year: text_or(raw.anno_pubblicazione.as_ref(), DEFAULT_YEAR),
            is_pnrr: raw.is_pnrr.as_ref().map_or(false, FieldValue::as_flag),
            contract_type: text_or(raw.oggetto_principale_contratto.as_ref(), NOT_AVAILABLE),
            cpv_code: text_or(raw.cod_cpv.as_ref(), NOT_AVAILABLE),
            cpv_description: text_or(raw.descrizione_cpv.as_ref(), NOT_AVAILABLE),
            publication_date: text_or(raw.data_pubblicazione.as_ref(), NOT_AVAILABLE),
            status: text_or(raw.stato.as_ref(), NOT_AVAILABLE),
            lot_count: text_or(raw.n_lotti_componenti.as_ref(), NOT_AVAILABLE),
            reserved_type: text_or(raw.tipo_appalto_riservato.as_ref(), NOT_AVAILABLE),
        };

        (record, issues)
    }

    /// The administration code, unless it is the sentinel.
    pub fn known_administration_code(&self) -> Option<&str> {
        let code = self.administration_code.as_str();
        (!code.is_empty() && code != NOT_AVAILABLE).then_some(code)
    }

    pub fn known_province(&self) -> Option<&str> {
        let province = self.province.as_str();
        (province != NOT_AVAILABLE).then_some(province)
    }
}
