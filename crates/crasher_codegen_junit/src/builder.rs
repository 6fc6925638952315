use crate::config::JUnitWriterConfig;
use std::path::PathBuf;

/// Utility that incrementally constructs Java source code with indentation handling.
#[derive(Debug, Default, Clone)]
pub struct JavaSourceBuilder {
    content: String,
    indent_level: usize,
    indent: String,
    newline: String,
}

impl JavaSourceBuilder {
    pub fn new(indent: String, newline: String) -> Self {
        Self {
            content: String::new(),
            indent_level: 0,
            indent,
            newline,
        }
    }

    pub fn from_config(config: &JUnitWriterConfig) -> Self {
        Self::new(config.indent.clone(), config.newline.clone())
    }

    /// Indented `line` followed by the newline. An empty `line` still
    /// receives the indentation.
    pub fn push_line(&mut self, line: &str) {
        self.push_indent();
        self.content.push_str(line);
        self.content.push_str(&self.newline);
    }

    pub fn push(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub fn push_newline(&mut self) {
        self.content.push_str(&self.newline);
    }

    pub fn push_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.content.push_str(&self.indent);
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Indentation string of the current level.
    pub fn current_indent(&self) -> String {
        self.indent.repeat(self.indent_level)
    }

    pub fn build(self) -> String {
        self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// A generated `.java` file: leading comment, package and one class body.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TestSourceFile {
    pub class_name: String,
    /// Package of the class, empty for the default package.
    pub package: String,
    pub comment: String,
    pub class_body: String,
}

impl TestSourceFile {
    pub fn file_name(&self) -> String {
        format!("{}.java", self.class_name)
    }

    /// Location below an output root, one directory per package segment.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        if !self.package.is_empty() {
            path.extend(self.package.split('.'));
        }
        path.push(self.file_name());
        path
    }

    pub fn to_source(&self, config: &JUnitWriterConfig) -> String {
        let mut builder = JavaSourceBuilder::from_config(config);

        builder.push_line("/*");
        builder.push_line(&format!(" * {}", self.file_name()));
        builder.push_line(" *");
        for line in self.comment.lines() {
            if line.is_empty() {
                builder.push_line(" *");
            } else {
                builder.push_line(&format!(" * {line}"));
            }
        }
        builder.push_line(" */");

        if !self.package.is_empty() {
            builder.push_line(&format!("package {};", self.package));
            builder.push_line("");
        }

        builder.push(&self.class_body);
        builder.build()
    }
}
