use crate::model::ClassifiedRecord;

/// Currently-free records not present in the cached snapshot, in `current` order.
/// Records are compared whole, so a title free again with a new end date is new.
pub fn find_new(current: &[ClassifiedRecord], cached: &[ClassifiedRecord]) -> Vec<ClassifiedRecord> {
    dedup(
        current
            .iter()
            .filter(|record| !cached.contains(record))
            .cloned()
            .collect(),
    )
}

/// Drops repeated records, keeping the first occurrence.
pub fn dedup(records: Vec<ClassifiedRecord>) -> Vec<ClassifiedRecord> {
    let mut unique: Vec<ClassifiedRecord> = Vec::with_capacity(records.len());
    for record in records {
        if !unique.contains(&record) {
            unique.push(record);
        }
    }
    unique
}
