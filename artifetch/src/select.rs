use chrono::{DateTime, FixedOffset};
use gdrive::FileRecord;

/// Creation time of `file`, `None` when it is not valid RFC3339.
pub fn created_at(file: &FileRecord) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(&file.created_time).ok()
}

/// Returns the most recently created file.
///
/// Files with an unparsable creation time are older than any other file.
/// Among files created at the same instant the first one wins.
pub fn latest(files: &[FileRecord]) -> Option<&FileRecord> {
    let mut best: Option<(Option<DateTime<FixedOffset>>, &FileRecord)> = None;
    for file in files {
        let created = created_at(file);
        let newer = match &best {
            Some((newest, _)) => created > *newest,
            None => true,
        };
        if newer {
            best = Some((created, file));
        }
    }
    best.map(|(_, file)| file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: &str, created: &str) -> FileRecord {
        FileRecord {
            id: id.into(),
            name: "1.2.3.zip".into(),
            created_time: created.into(),
        }
    }

    #[test]
    fn empty() {
        assert!(latest(&[]).is_none());
    }

    #[test]
    fn single() {
        let files = [file("a", "2023-05-01T12:00:00Z")];
        assert_eq!(latest(&files).unwrap().id, "a");
    }

    #[test]
    fn newest_wins() {
        let files = [
            file("old", "2023-05-01T12:00:00Z"),
            file("new", "2023-05-02T08:30:00.123Z"),
            file("mid", "2023-05-01T23:59:59Z"),
        ];
        assert_eq!(latest(&files).unwrap().id, "new");
    }

    #[test]
    fn compares_instants_across_offsets() {
        let files = [
            file("utc", "2023-05-01T12:00:00Z"),
            file("cest", "2023-05-01T13:30:00+02:00"),
        ];
        assert_eq!(latest(&files).unwrap().id, "utc");
    }

    #[test]
    fn ties_keep_first() {
        let files = [
            file("first", "2023-05-01T12:00:00Z"),
            file("second", "2023-05-01T14:00:00+02:00"),
            file("older", "2023-01-01T00:00:00Z"),
        ];
        assert_eq!(latest(&files).unwrap().id, "first");
    }

    #[test]
    fn unparsable_is_oldest() {
        let files = [
            file("broken", "yesterday"),
            file("valid", "1970-01-01T00:00:00Z"),
            file("empty", ""),
        ];
        assert_eq!(latest(&files).unwrap().id, "valid");
    }

    #[test]
    fn all_unparsable_keep_first() {
        let files = [file("a", "not a date"), file("b", "")];
        assert_eq!(latest(&files).unwrap().id, "a");
    }
}
