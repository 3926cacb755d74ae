#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::diagnostics::Severity;
    use crate::lookup_table::{load_lookup_table, LookupTable, UNTAGGED};
    use crate::records::lookup_record::LookupRule;
    use crate::tests::support::RecordingSink;

    fn load(csv: &'static str) -> (LookupTable, RecordingSink) {
        let sink = RecordingSink::new();
        let table = LookupTable::from_reader(csv.as_bytes(), &sink).unwrap();
        (table, sink)
    }

    #[test]
    fn test_insert_keeps_every_tag_in_order() {
        let mut table = LookupTable::new();
        for tag in ["sv_P1", "sv_P2", "sv_P1"] {
            table.insert(LookupRule {
                port: "25".to_string(),
                protocol: "tcp".to_string(),
                tag: tag.to_string(),
            });
        }

        assert_eq!(table.lookup_tags("25", "tcp"), vec!["sv_P1", "sv_P2", "sv_P1"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_lookup_tags_falls_back_to_untagged() {
        let (table, _) = load("dstport,protocol,tag\n25,tcp,sv_P1\n");

        assert_eq!(table.lookup_tags("25", "udp"), vec![UNTAGGED]);
        assert_eq!(table.lookup_tags("26", "tcp"), vec![UNTAGGED]);
        // The fallback is not stored in the table.
        assert_eq!(table.get("25", "udp"), None);
    }

    #[test]
    fn test_from_reader_normalizes_fields() {
        let (table, sink) = load("dstport,protocol,tag\n 443 , TCP ,  sv_P2 \n");

        assert_eq!(table.lookup_tags("443", "tcp"), vec!["sv_P2"]);
        assert_eq!(sink.count(Severity::Warning), 0);
    }

    #[test]
    fn test_from_reader_shared_pair_collects_tags() {
        let (table, _) = load(
            "dstport,protocol,tag\n\
             110,tcp,email\n\
             110,tcp,sv_P4\n\
             110,tcp,email\n\
             110,udp,other\n",
        );

        assert_eq!(table.lookup_tags("110", "tcp"), vec!["email", "sv_P4", "email"]);
        assert_eq!(table.lookup_tags("110", "udp"), vec!["other"]);
    }

    #[test]
    fn test_from_reader_skips_invalid_rows() {
        let (table, sink) = load(
            "dstport,protocol,tag\n\
             80abc,tcp,web\n\
             ,tcp,web\n\
             81,,web\n\
             82,tcp,\n\
             -1,tcp,web\n\
             83,tcp,web\n",
        );

        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup_tags("83", "tcp"), vec!["web"]);
        assert_eq!(table.lookup_tags("80abc", "tcp"), vec![UNTAGGED]);
        assert_eq!(sink.count(Severity::Warning), 5);
        assert!(sink.messages(Severity::Warning)[0].contains("80abc"));
    }

    #[test]
    fn test_from_reader_ignores_extra_columns() {
        let (table, _) = load("comment,tag,protocol,dstport\nmail,email,tcp,25\n");

        assert_eq!(table.lookup_tags("25", "tcp"), vec!["email"]);
    }

    #[test]
    fn test_from_reader_duplicate_header_keeps_first() {
        let (table, _) = load("dstport,protocol,tag, tag\n25,tcp,email,spam\n");

        assert_eq!(table.lookup_tags("25", "tcp"), vec!["email"]);
    }

    #[test]
    fn test_from_reader_skips_short_rows() {
        let (table, sink) = load("dstport,protocol,tag\n22,tcp\n23,tcp,sv_P1\n");

        assert_eq!(table.len(), 1);
        assert_eq!(sink.count(Severity::Warning), 1);
    }

    #[test]
    fn test_from_reader_rejects_missing_column() {
        let sink = RecordingSink::new();
        let result = LookupTable::from_reader("port,protocol,tag\n25,tcp,email\n".as_bytes(), &sink);

        assert!(result.is_err());
    }

    #[test]
    fn test_from_reader_empty_source() {
        let (table, sink) = load("");

        assert!(table.is_empty());
        assert_eq!(sink.count(Severity::Warning), 0);
    }

    #[test]
    fn test_load_lookup_table_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lookup.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "dstport,protocol,tag").unwrap();
        writeln!(file, "993,tcp,email").unwrap();
        drop(file);

        let sink = RecordingSink::new();
        let table = load_lookup_table(path.to_str().unwrap(), &sink);

        assert_eq!(table.lookup_tags("993", "tcp"), vec!["email"]);
        assert_eq!(sink.count(Severity::Error), 0);
        assert!(sink
            .messages(Severity::Info)
            .iter()
            .any(|m| m.starts_with("Loaded lookup table from")));
    }

    #[test]
    fn test_load_lookup_table_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        let sink = RecordingSink::new();
        let table = load_lookup_table(path.to_str().unwrap(), &sink);

        assert!(table.is_empty());
        assert_eq!(sink.count(Severity::Error), 1);
        assert!(sink.messages(Severity::Error)[0].contains("source unavailable"));
    }
}
