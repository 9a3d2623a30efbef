//! Java throw-site analyzer using tree-sitter.

use std::path::Path;

use tree_sitter::{Language, Node, Parser};

use crate::aggregate::UNKNOWN_EXCEPTION_TYPE;
use crate::analysis::{LanguageAnalyzer, ParsedFile, Span, ThrowSite, ThrownExpr};
use crate::error::{Result, ScanError};

/// Node kinds the walk distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JavaNode {
    ThrowStatement,
    ObjectCreation,
    GenericType,
    ScopedType,
    Comment,
    Other,
}

impl JavaNode {
    fn of(node: Node) -> Self {
        match node.kind() {
            "throw_statement" => JavaNode::ThrowStatement,
            "object_creation_expression" => JavaNode::ObjectCreation,
            "generic_type" => JavaNode::GenericType,
            "scoped_type_identifier" => JavaNode::ScopedType,
            "line_comment" | "block_comment" => JavaNode::Comment,
            _ => JavaNode::Other,
        }
    }
}

pub struct JavaAnalyzer {
    language: Language,
}

impl JavaAnalyzer {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Build a throw site from a `throw_statement` node.
    fn throw_site(&self, parsed: &ParsedFile, node: Node) -> Option<ThrowSite> {
        let operand = first_named_non_comment(node)?;

        let thrown = match JavaNode::of(operand) {
            JavaNode::ObjectCreation => ThrownExpr::Construction {
                type_name: self.constructed_type_name(parsed, operand),
                arguments: self.constructor_arguments(parsed, operand),
            },
            _ => ThrownExpr::Existing {
                text: parsed.node_text(operand).to_string(),
            },
        };

        Some(ThrowSite {
            span: Some(Span::from_node(node)),
            thrown,
        })
    }

    fn constructed_type_name(&self, parsed: &ParsedFile, creation: Node) -> String {
        match creation.child_by_field_name("type") {
            Some(ty) => simple_type_name(parsed, ty),
            None => UNKNOWN_EXCEPTION_TYPE.to_string(),
        }
    }

    fn constructor_arguments(&self, parsed: &ParsedFile, creation: Node) -> Vec<String> {
        let args = match creation.child_by_field_name("arguments") {
            Some(a) => a,
            None => return Vec::new(),
        };

        let mut cursor = args.walk();
        let arguments = args
            .named_children(&mut cursor)
            .filter(|n| JavaNode::of(*n) != JavaNode::Comment)
            .map(|n| parsed.node_text(n).to_string())
            .collect();
        arguments
    }
}

/// Reduce a type node to its simple name: `a.b.Outer.Inner<T>` -> `Inner`.
fn simple_type_name(parsed: &ParsedFile, ty: Node) -> String {
    match JavaNode::of(ty) {
        JavaNode::GenericType => {
            let mut cursor = ty.walk();
            let base = ty
                .named_children(&mut cursor)
                .find(|n| n.kind() != "type_arguments");
            match base {
                Some(base) => simple_type_name(parsed, base),
                None => parsed.node_text(ty).to_string(),
            }
        }
        JavaNode::ScopedType => {
            let mut cursor = ty.walk();
            let last = ty
                .named_children(&mut cursor)
                .filter(|n| n.kind() == "type_identifier")
                .last();
            match last {
                Some(ident) => parsed.node_text(ident).to_string(),
                None => parsed.node_text(ty).to_string(),
            }
        }
        _ => parsed.node_text(ty).to_string(),
    }
}

fn first_named_non_comment(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|n| JavaNode::of(*n) != JavaNode::Comment);
    found
}

impl Default for JavaAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for JavaAnalyzer {
    fn language_id(&self) -> &'static str {
        "java"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn parse(&self, path: &Path, source: &[u8]) -> Result<ParsedFile> {
        let mut parser = self.create_parser()?;
        let tree = parser.parse(source, None).ok_or_else(|| ScanError::Parse {
            path: path.to_path_buf(),
            reason: "parser returned no tree".to_string(),
        })?;

        let parsed = ParsedFile {
            tree,
            source: source.to_vec(),
            path: path.to_path_buf(),
        };

        if parsed.has_syntax_errors() {
            let reason = match parsed.first_error_line() {
                Some(line) => format!("syntax error near line {}", line),
                None => "syntax error".to_string(),
            };
            return Err(ScanError::Parse {
                path: path.to_path_buf(),
                reason,
            });
        }

        Ok(parsed)
    }

    fn find_throw_sites(&self, parsed: &ParsedFile) -> Vec<ThrowSite> {
        let mut sites = Vec::new();
        let mut cursor = parsed.tree.walk();

        // Pre-order walk over every node; nested classes, lambdas and
        // anonymous class bodies are all reached.
        loop {
            let node = cursor.node();
            if JavaNode::of(node) == JavaNode::ThrowStatement {
                if let Some(site) = self.throw_site(parsed, node) {
                    sites.push(site);
                }
            }

            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return sites;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn throw_sites(source: &str) -> Vec<ThrowSite> {
        let analyzer = JavaAnalyzer::new();
        let parsed = analyzer
            .parse(Path::new("Test.java"), source.as_bytes())
            .unwrap();
        analyzer.find_throw_sites(&parsed)
    }

    fn construction(site: &ThrowSite) -> (&str, Vec<&str>) {
        match &site.thrown {
            ThrownExpr::Construction {
                type_name,
                arguments,
            } => (
                type_name.as_str(),
                arguments.iter().map(|a| a.as_str()).collect(),
            ),
            other => panic!("expected construction, got {:?}", other),
        }
    }

    #[test]
    fn test_construction_with_arguments() {
        let sites = throw_sites(
            r#"
class Test {
    void check(Object x) {
        throw new IllegalArgumentException("bad", x);
    }
}
"#,
        );
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].line(), 4);
        let (ty, args) = construction(&sites[0]);
        assert_eq!(ty, "IllegalArgumentException");
        assert_eq!(args, vec!["\"bad\"", "x"]);
    }

    #[test]
    fn test_rethrow_of_variable() {
        let sites = throw_sites(
            r#"
class Test {
    private RuntimeException cachedError;
    void fail() {
        throw cachedError;
    }
}
"#,
        );
        assert_eq!(sites.len(), 1);
        assert_eq!(
            sites[0].thrown,
            ThrownExpr::Existing {
                text: "cachedError".to_string()
            }
        );
    }

    #[test]
    fn test_nested_throws_are_found() {
        let sites = throw_sites(
            r#"
class Outer {
    void run(java.util.List<String> items) {
        for (String item : items) {
            if (item.isEmpty()) {
                throw new IllegalStateException("empty");
            }
        }
        Runnable r = () -> {
            throw new UnsupportedOperationException();
        };
        try {
            r.run();
        } catch (RuntimeException e) {
            throw e;
        }
    }

    static class Inner {
        void go() {
            Object o = new Object() {
                public String toString() {
                    throw new AssertionError(makeMessage());
                }
            };
        }
    }
}
"#,
        );
        let lines: Vec<usize> = sites.iter().map(|s| s.line()).collect();
        assert_eq!(lines, vec![6, 10, 15, 23]);
        assert_eq!(construction(&sites[1]), ("UnsupportedOperationException", vec![]));
        assert!(!sites[2].thrown.is_construction());
        assert_eq!(
            construction(&sites[3]),
            ("AssertionError", vec!["makeMessage()"])
        );
    }

    #[test]
    fn test_type_names_are_simple() {
        let sites = throw_sites(
            r#"
class Test {
    void a() { throw new java.lang.IllegalStateException("q"); }
    void b() { throw new Errors.Conflict(); }
    void c() { throw new Wrapped<String>("w"); }
}
"#,
        );
        let types: Vec<&str> = sites.iter().map(|s| construction(s).0).collect();
        assert_eq!(types, vec!["IllegalStateException", "Conflict", "Wrapped"]);
    }

    #[test]
    fn test_arguments_are_verbatim_and_skip_comments() {
        let sites = throw_sites(
            r#"
class Test {
    void a(int code) {
        throw new ApiException(/* status */ code,   "failed: " + code);
    }
}
"#,
        );
        let (_, args) = construction(&sites[0]);
        assert_eq!(args, vec!["code", "\"failed: \" + code"]);
    }

    #[test]
    fn test_method_call_result_is_not_a_construction() {
        let sites = throw_sites(
            r#"
class Test {
    void a() { throw Errors.notFound("user"); }
}
"#,
        );
        assert_eq!(
            sites[0].thrown,
            ThrownExpr::Existing {
                text: "Errors.notFound(\"user\")".to_string()
            }
        );
    }

    #[test]
    fn test_syntax_error_rejects_file() {
        let analyzer = JavaAnalyzer::new();
        let err = analyzer
            .parse(
                Path::new("Broken.java"),
                b"class Broken {\n  void a() {\n    throw new X(;\n  }\n}\n",
            )
            .err()
            .expect("broken source should not parse");
        assert!(matches!(err, ScanError::Parse { .. }));
        assert!(err.to_string().contains("Broken.java"));
    }

    #[test]
    fn test_no_throws() {
        assert!(throw_sites("class Empty { int x = 1; }").is_empty());
    }
}
