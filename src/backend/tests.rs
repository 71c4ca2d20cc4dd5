#[cfg(test)]
mod tests {
    use crate::backend::{IniParser, JsonParser, PickleParser, PropertiesParser, ShellVarsParser, XmlParser};
    use crate::error::Error;
    use crate::parser::options::{AC_ORDERED, AC_PARSE_VALUE};
    use crate::parser::{default_registry, Document, Options, Parser};
    use crate::value::Value;

    fn load_text(parser: &dyn Parser, content: &str, options: &Options) -> Value {
        parser.load_from_string(&Document::from(content), options).unwrap()
    }

    fn dump_text(parser: &dyn Parser, value: &Value, options: &Options) -> String {
        parser
            .dump_to_string(value, options)
            .unwrap()
            .as_text()
            .unwrap()
            .to_string()
    }

    fn keys(value: &Value) -> Vec<&str> {
        value.as_map().unwrap().keys().map(String::as_str).collect()
    }

    // ========================================================================
    // JSON Tests
    // ========================================================================

    #[test]
    fn test_json_load_keeps_document_order() {
        let value = load_text(&JsonParser, r#"{"z": 1, "a": {"y": true, "b": null}}"#, &Options::new());

        assert_eq!(keys(&value), vec!["z", "a"]);
        assert_eq!(keys(value.get("a").unwrap()), vec!["y", "b"]);
        assert_eq!(value.get("z"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_json_primitive_root() {
        assert_eq!(load_text(&JsonParser, "42", &Options::new()), Value::Integer(42));
        assert_eq!(dump_text(&JsonParser, &Value::from("x"), &Options::new()), "\"x\"");
    }

    #[test]
    fn test_json_dump_compact_by_default() {
        let value: Value = [("a", Value::Integer(1)), ("b", Value::Array(vec![true.into(), Value::Null]))]
            .into_iter()
            .collect();
        assert_eq!(dump_text(&JsonParser, &value, &Options::new()), r#"{"a":1,"b":[true,null]}"#);
    }

    #[test]
    fn test_json_dump_indent_and_sort_keys() {
        let value: Value = [("b", 2), ("a", 1)].into_iter().collect();
        let options = Options::new().with("indent", 2).with("sort_keys", true);

        assert_eq!(dump_text(&JsonParser, &value, &options), "{\n  \"a\": 1,\n  \"b\": 2\n}");
    }

    #[test]
    fn test_json_indent_out_of_range() {
        let value: Value = [("a", 1)].into_iter().collect();

        for width in [-1, 1 << 40] {
            let err = JsonParser
                .dump_to_string(&value, &Options::new().with("indent", Value::Integer(width)))
                .unwrap_err();
            assert!(matches!(err, Error::InvalidOption { ref name, .. } if name == "indent"));
        }

        let dumped = dump_text(&JsonParser, &value, &Options::new().with("indent", 0));
        assert_eq!(dumped, "{\n\"a\": 1\n}");
    }

    #[test]
    fn test_json_ignores_foreign_options() {
        let value: Value = [("a", 1)].into_iter().collect();
        let options = Options::new().with("pretty", true).with("protocol", 2);
        assert_eq!(dump_text(&JsonParser, &value, &options), r#"{"a":1}"#);
    }

    #[test]
    fn test_json_codec_error_is_wrapped() {
        let err = JsonParser
            .load_from_string(&Document::from("{not json"), &Options::new())
            .unwrap_err();

        match err {
            Error::Codec { type_id, source } => {
                assert_eq!(type_id, "json");
                assert!(source.downcast_ref::<serde_json::Error>().is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_json_conflicting_hooks() {
        let options = Options::new()
            .with("object_hook", "ordered")
            .with("object_pairs_hook", "ordered");
        let err = JsonParser
            .load_from_string(&Document::from("{}"), &options)
            .unwrap_err();
        assert!(matches!(err, Error::ConflictingDictOptions { type_id: "json", .. }));
    }

    // ========================================================================
    // INI Tests
    // ========================================================================

    const INI_DOC: &str = "name = demo\n\n[server]\nhost = localhost\nport = 8080\n\n[flags]\ndebug = true\n";

    #[test]
    fn test_ini_sections_become_mappings() {
        let value = load_text(&IniParser, INI_DOC, &Options::new());

        assert_eq!(keys(&value), vec!["name", "server", "flags"]);
        assert_eq!(value.get("name"), Some(&Value::from("demo")));
        let server = value.get("server").unwrap();
        assert_eq!(server.get("port"), Some(&Value::from("8080")));
    }

    #[test]
    fn test_ini_parse_value() {
        let options = Options::new().with(AC_PARSE_VALUE, true);
        let value = load_text(&IniParser, INI_DOC, &options);

        assert_eq!(value.get("server").unwrap().get("port"), Some(&Value::Integer(8080)));
        assert_eq!(value.get("flags").unwrap().get("debug"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_ini_dump_reloads() {
        let value = load_text(&IniParser, INI_DOC, &Options::new());
        let dumped = dump_text(&IniParser, &value, &Options::new());

        assert!(dumped.contains("[server]"));
        assert_eq!(load_text(&IniParser, &dumped, &Options::new()), value);
    }

    #[test]
    fn test_ini_rejects_deep_nesting() {
        let inner: Value = [("deep", 1)].into_iter().collect();
        let section: Value = [("inner", inner)].into_iter().collect();
        let value: Value = [("section", section)].into_iter().collect();

        let err = IniParser.dump_to_string(&value, &Options::new()).unwrap_err();
        assert!(matches!(err, Error::Unsupported { type_id: "ini", .. }));
    }

    #[test]
    fn test_ini_key_and_section_name_clash() {
        let err = IniParser
            .load_from_string(&Document::from("a = 1\n[a]\nb = 2\n"), &Options::new())
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported { type_id: "ini", ref message } if message.contains("'a'")));
    }

    #[test]
    fn test_ini_repeated_section_merges() {
        let value = load_text(&IniParser, "[s]\nx = 1\n[t]\ny = 2\n[s]\nz = 3\n", &Options::new());

        assert_eq!(keys(&value), vec!["s", "t"]);
        assert_eq!(keys(value.get("s").unwrap()), vec!["x", "z"]);
    }

    #[test]
    fn test_ini_rejects_primitive_root() {
        let err = IniParser
            .dump_to_string(&Value::Integer(42), &Options::new())
            .unwrap_err();
        assert!(matches!(err, Error::PrimitiveRoot { type_id: "ini", found: "integer" }));
    }

    // ========================================================================
    // XML Tests
    // ========================================================================

    #[test]
    fn test_xml_attrs_text_and_children() {
        let doc = r#"<?xml version="1.0"?>
<config version="2">
  <name>demo</name>
  <port>8080</port>
  <empty/>
</config>"#;
        let value = load_text(&XmlParser, doc, &Options::new());
        let config = value.get("config").unwrap();

        assert_eq!(keys(config), vec!["@attrs", "name", "port", "empty"]);
        assert_eq!(config.get("@attrs").unwrap().get("version"), Some(&Value::from("2")));
        assert_eq!(config.get("name"), Some(&Value::from("demo")));
        assert_eq!(config.get("empty"), Some(&Value::Null));
    }

    #[test]
    fn test_xml_repeated_children_keep_order() {
        let value = load_text(&XmlParser, "<list><item>a</item><item>b</item></list>", &Options::new());
        let children = value.get("list").unwrap().get("@children").unwrap().as_array().unwrap();

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].get("item"), Some(&Value::from("a")));
        assert_eq!(children[1].get("item"), Some(&Value::from("b")));
    }

    #[test]
    fn test_xml_merge_attrs_and_parse_value() {
        let options = Options::new().with("merge_attrs", true).with(AC_PARSE_VALUE, true);
        let value = load_text(&XmlParser, r#"<a x="1"><b>true</b>text</a>"#, &options);
        let body = value.get("a").unwrap();

        assert_eq!(body.get("x"), Some(&Value::Integer(1)));
        assert_eq!(body.get("b"), Some(&Value::Bool(true)));
        assert_eq!(body.get("@text"), Some(&Value::from("text")));
    }

    #[test]
    fn test_xml_dump() {
        let attrs: Value = [("id", "7")].into_iter().collect();
        let body: Value = [
            ("@attrs", attrs),
            ("name", Value::from("n & m")),
            ("tags", Value::Array(vec!["a".into(), "b".into()])),
            ("none", Value::Null),
        ]
        .into_iter()
        .collect();
        let value: Value = [("root", body)].into_iter().collect();

        let dumped = dump_text(&XmlParser, &value, &Options::new());
        assert!(dumped.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(dumped.contains(r#"<root id="7">"#));
        assert!(dumped.contains("<name>n &amp; m</name>"));
        assert!(dumped.contains("<tags>a</tags><tags>b</tags>"));
        assert!(dumped.contains("<none/>"));

        // Repeated <tags> force every child of <root> into @children
        let reloaded = load_text(&XmlParser, &dumped, &Options::new());
        let children = reloaded.get("root").unwrap().get("@children").unwrap().as_array().unwrap();
        assert_eq!(children.len(), 4);
        assert_eq!(children[0].get("name"), Some(&Value::from("n & m")));
    }

    #[test]
    fn test_xml_dump_needs_single_root() {
        let value: Value = [("a", 1), ("b", 2)].into_iter().collect();
        let err = XmlParser.dump_to_string(&value, &Options::new()).unwrap_err();
        assert!(matches!(err, Error::Unsupported { type_id: "xml", .. }));
    }

    #[test]
    fn test_xml_malformed_is_codec_error() {
        for doc in ["<a><b></a>", "<a>", "<a/><b/>", "<a></a><b></b>"] {
            let err = XmlParser
                .load_from_string(&Document::from(doc), &Options::new())
                .unwrap_err();
            assert!(matches!(err, Error::Codec { type_id: "xml", .. }), "{doc}: {err:?}");
        }
    }

    // ========================================================================
    // Properties Tests
    // ========================================================================

    #[test]
    fn test_properties_load_and_dump() {
        let doc = "# comment\na.b = 1\nname: demo\nlong = one \\\n    two\n";
        let value = load_text(&PropertiesParser, doc, &Options::new());

        assert_eq!(keys(&value), vec!["a.b", "name", "long"]);
        assert_eq!(value.get("a.b"), Some(&Value::from("1")));
        assert_eq!(value.get("long"), Some(&Value::from("one two")));

        let dumped = dump_text(&PropertiesParser, &value, &Options::new());
        assert_eq!(load_text(&PropertiesParser, &dumped, &Options::new()), value);
    }

    #[test]
    fn test_properties_parse_value() {
        let options = Options::new().with(AC_PARSE_VALUE, true);
        let value = load_text(&PropertiesParser, "port=8080\nratio=0.5\n", &options);

        assert_eq!(value.get("port"), Some(&Value::Integer(8080)));
        assert_eq!(value.get("ratio"), Some(&Value::Float(0.5)));
    }

    // ========================================================================
    // Shell Variables Tests
    // ========================================================================

    #[test]
    fn test_shellvars_load() {
        let doc = "# comment\nexport FOO=bar\nBAZ=\"quoted value\"\nN=42 # trailing\nnot an assignment\n";
        let value = load_text(&ShellVarsParser, doc, &Options::new().with(AC_ORDERED, true));

        assert_eq!(keys(&value), vec!["FOO", "BAZ", "N"]);
        assert_eq!(value.get("BAZ"), Some(&Value::from("quoted value")));
        assert_eq!(value.get("N"), Some(&Value::from("42")));
    }

    #[test]
    fn test_shellvars_sorted_by_default() {
        let value = load_text(&ShellVarsParser, "B=1\nA=2\n", &Options::new());
        assert_eq!(keys(&value), vec!["A", "B"]);
    }

    #[test]
    fn test_shellvars_dump_quotes_values() {
        let value: Value = [("GREETING", "it's here"), ("PLAIN", "x")].into_iter().collect();
        let dumped = dump_text(&ShellVarsParser, &value, &Options::new());

        assert_eq!(dumped, "GREETING='it'\\''s here'\nPLAIN='x'\n");
        assert_eq!(load_text(&ShellVarsParser, &dumped, &Options::new()), value);
    }

    #[test]
    fn test_shellvars_rejects_bad_names() {
        let value: Value = [("not-valid", "x")].into_iter().collect();
        let err = ShellVarsParser.dump_to_string(&value, &Options::new()).unwrap_err();
        assert!(matches!(err, Error::Unsupported { type_id: "shellvars", .. }));
    }

    // ========================================================================
    // Pickle Tests
    // ========================================================================

    fn sample() -> Value {
        [
            ("a", Value::Integer(1)),
            ("b", Value::Array(vec![Value::Float(1.5), Value::from("x")])),
            ("c", Value::Null),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_pickle_binary_round_trip() {
        let dumped = PickleParser.dump_to_string(&sample(), &Options::new()).unwrap();
        assert!(dumped.is_binary());

        let loaded = PickleParser.load_from_string(&dumped, &Options::new()).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_pickle_protocol_option() {
        let options = Options::new().with("protocol", 2);
        let dumped = PickleParser.dump_to_string(&sample(), &options).unwrap();
        assert_eq!(PickleParser.load_from_string(&dumped, &Options::new()).unwrap(), sample());

        let err = PickleParser
            .dump_to_string(&sample(), &Options::new().with("protocol", 9))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOption { .. }));
    }

    #[test]
    fn test_pickle_rejects_text_content() {
        let err = PickleParser
            .load_from_string(&Document::from("not bytes"), &Options::new())
            .unwrap_err();
        assert!(matches!(err, Error::ContentMismatch { type_id: "pickle", expected: "binary" }));
    }

    // ========================================================================
    // Optional Backend Tests
    // ========================================================================

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_load_and_dump() {
        use crate::backend::YamlParser;

        let value = load_text(&YamlParser, "b: 1\na:\n  - x\n  - 2.5\n", &Options::new());
        assert_eq!(keys(&value), vec!["b", "a"]);
        assert_eq!(value.get("a").unwrap().as_array().unwrap()[1], Value::Float(2.5));

        let dumped = dump_text(&YamlParser, &value, &Options::new().with("sort_keys", true));
        assert!(dumped.starts_with("a:"));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_sorted_and_pretty() {
        use crate::backend::TomlParser;

        let value = load_text(&TomlParser, "zeta = 1\nalpha = \"a\"\n[table]\nkey = true\n", &Options::new());
        assert_eq!(keys(&value), vec!["alpha", "table", "zeta"]);
        assert_eq!(value.get("table").unwrap().get("key"), Some(&Value::Bool(true)));

        let dumped = dump_text(&TomlParser, &value, &Options::new().with("pretty", true));
        assert!(dumped.contains("[table]"));
        assert_eq!(load_text(&TomlParser, &dumped, &Options::new()), value);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_rejects_primitive_root() {
        use crate::backend::TomlParser;

        let err = TomlParser
            .dump_to_string(&Value::Array(vec![]), &Options::new())
            .unwrap_err();
        assert!(matches!(err, Error::PrimitiveRoot { type_id: "toml", found: "array" }));
    }

    #[cfg(feature = "msgpack")]
    #[test]
    fn test_msgpack_round_trip() {
        use crate::backend::MsgPackParser;

        let dumped = MsgPackParser.dump_to_string(&sample(), &Options::new()).unwrap();
        assert_eq!(MsgPackParser.load_from_string(&dumped, &Options::new()).unwrap(), sample());
    }

    #[cfg(feature = "cbor")]
    #[test]
    fn test_cbor_round_trip() {
        use crate::backend::CborParser;

        let dumped = CborParser.dump_to_string(&sample(), &Options::new()).unwrap();
        assert_eq!(CborParser.load_from_string(&dumped, &Options::new()).unwrap(), sample());
    }

    #[cfg(feature = "bson")]
    #[test]
    fn test_bson_round_trip_keeps_order() {
        use crate::backend::BsonParser;

        let nested: Value = [("ok", true)].into_iter().collect();
        let value: Value = [("name", Value::from("x")), ("n", Value::Integer(3)), ("nested", nested)]
            .into_iter()
            .collect();

        let dumped = BsonParser.dump_to_string(&value, &Options::new()).unwrap();
        let loaded = BsonParser.load_from_string(&dumped, &Options::new()).unwrap();
        assert_eq!(keys(&loaded), vec!["name", "n", "nested"]);
        assert_eq!(loaded, value);
    }

    #[cfg(feature = "json5")]
    #[test]
    fn test_json5_comments_and_trailing_commas() {
        use crate::backend::Json5Parser;

        let value = load_text(&Json5Parser, "// c\n{name: 'demo', list: [1, 2,],}", &Options::new());
        assert_eq!(value.get("name"), Some(&Value::from("demo")));
        assert_eq!(value.get("list").unwrap().as_array().unwrap().len(), 2);
    }

    // ========================================================================
    // Default Registration Tests
    // ========================================================================

    #[test]
    fn test_default_registry_has_builtins() {
        let registry = default_registry();

        for type_id in ["json", "ini", "xml", "properties", "shellvars", "pickle"] {
            assert!(registry.find_by_type(type_id).is_some(), "missing {type_id}");
        }
        assert_eq!(registry.find_by_type("configparser").unwrap().type_id(), "ini");
        assert_eq!(registry.find_by_extension("pkl").unwrap().type_id(), "pickle");
        assert_eq!(registry.find_by_extension("sh").unwrap().type_id(), "shellvars");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_default_registry_has_optional_yaml() {
        let registry = default_registry();
        assert_eq!(registry.find_by_extension("yml").unwrap().type_id(), "yaml");
        assert_eq!(registry.find_by_type("yml").unwrap().type_id(), "yaml");
    }
}
