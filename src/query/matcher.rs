use crate::record::ContractRecord;

/// The lowercase, space-joined text a record is searched by: identifier,
/// administration name, lot object, province, AI category, sector.
pub fn search_text(record: &ContractRecord) -> String {
    [
        record.id.as_str(),
        record.administration_name.as_str(),
        record.lot_object.as_str(),
        record.province.as_str(),
        record.ai_category.as_str(),
        record.sector.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Trimmed, lowercased form of a user query.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Query length as the user sees it (characters, not bytes).
pub fn query_len(normalized: &str) -> usize {
    normalized.chars().count()
}

/// Plain substring containment; `needle` must already be normalized.
pub fn is_match(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}
