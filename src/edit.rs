use crate::card::{find_last_match, Keyword};
use crate::error::{FitsError, Result};
use crate::header::FitsHeader;

/// Payload for inserting a new keyword.
///
/// An empty `anchor` inserts at the end of the header, directly before the
/// END sentinel. A non-empty anchor is resolved by name over the editable
/// records; `after` selects which side of it the new record lands on.
#[derive(Debug, Clone)]
pub struct AddSpec {
    pub keyword: Keyword,
    pub anchor: String,
    pub after: bool,
    pub allow_duplicates: bool,
}

/// Payload for replacing an existing keyword's value and comment.
///
/// `target` carries the name to look for, plus the value/comment that must
/// also match when `name_only` is false.
#[derive(Debug, Clone)]
pub struct EditSpec {
    pub target: Keyword,
    pub name_only: bool,
    pub value: String,
    pub comment: String,
}

/// Payload for deleting a keyword.
#[derive(Debug, Clone)]
pub struct RemoveSpec {
    pub target: Keyword,
    pub name_only: bool,
}

/// Insert `spec.keyword` into a copy of `header`.
///
/// The duplicate scan covers the whole sequence, structural prefix
/// included, so an existing NAXIS1 blocks adding another even though the
/// prefix itself is not editable.
pub fn add_keyword(header: &FitsHeader, spec: &AddSpec) -> Result<FitsHeader> {
    if header.contains_name(&spec.keyword.name) && !spec.allow_duplicates {
        return Err(FitsError::DuplicateKeyword(spec.keyword.name.clone()));
    }

    let index = if spec.anchor.trim().is_empty() {
        header.end_index()
    } else {
        let probe = Keyword::new(&spec.anchor, "", "");
        let anchor_index =
            find_last_match(&header.records, header.editable_range(), &probe, true)
                .ok_or_else(|| FitsError::KeywordNotFound(probe.name.clone()))?;
        anchor_index + usize::from(spec.after)
    };

    let mut records = header.records.clone();
    let index = index.min(records.len());
    records.insert(index, spec.keyword.clone());
    Ok(FitsHeader::from_records(records))
}

/// Replace the value and comment of the keyword matched by `spec.target`.
/// The record's name and position are left untouched.
pub fn edit_keyword(header: &FitsHeader, spec: &EditSpec) -> Result<FitsHeader> {
    let index = resolve_target(header, &spec.target, spec.name_only)?;
    let mut records = header.records.clone();
    records[index].value = spec.value.clone();
    records[index].comment = spec.comment.clone();
    Ok(FitsHeader::from_records(records))
}

/// Delete the keyword matched by `spec.target`; every other record keeps
/// its relative position.
pub fn remove_keyword(header: &FitsHeader, spec: &RemoveSpec) -> Result<FitsHeader> {
    let index = resolve_target(header, &spec.target, spec.name_only)?;
    let mut records = header.records.clone();
    records.remove(index);
    Ok(FitsHeader::from_records(records))
}

/// Resolve an edit/remove target over the editable records. On repeated
/// keywords the last occurrence wins.
fn resolve_target(header: &FitsHeader, target: &Keyword, name_only: bool) -> Result<usize> {
    find_last_match(&header.records, header.editable_range(), target, name_only)
        .ok_or_else(|| FitsError::KeywordNotFound(target.name.clone()))
}
