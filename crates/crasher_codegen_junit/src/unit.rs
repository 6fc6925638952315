use crate::builder::{JavaSourceBuilder, TestSourceFile};
use crate::config::JUnitWriterConfig;
use crasher_plan::Block;
use crasher_types::{ClassName, NameContext};

/// `{`, one line per statement one level deeper than `indent`, and a
/// closing `}` at `indent` without a trailing newline.
pub fn block_text(
    block: &Block,
    context: &NameContext,
    indent: &str,
    config: &JUnitWriterConfig,
) -> String {
    let mut text = String::from("{");
    text.push_str(&config.newline);
    for statement in block.statement_texts(context) {
        text.push_str(indent);
        text.push_str(&config.indent);
        text.push_str(&statement);
        text.push_str(&config.newline);
    }
    text.push_str(indent);
    text.push('}');
    text
}

/// One JUnit test class for a class under test: a test method per block
/// between a fixed header and footer.
#[derive(Debug, Clone)]
pub struct TestCaseUnit<'a> {
    class: ClassName,
    context: NameContext,
    blocks: &'a [Block],
    filtering: bool,
    suffix: i64,
    comment: String,
    config: JUnitWriterConfig,
}

impl<'a> TestCaseUnit<'a> {
    /// With `filtering`, every test method forwards raised failures to
    /// `dispatchException`, which decides whether they reveal a defect.
    pub fn new(class: ClassName, blocks: &'a [Block], filtering: bool) -> Self {
        Self {
            context: NameContext::for_class(&class),
            class,
            blocks,
            filtering,
            suffix: 0,
            comment: String::new(),
            config: JUnitWriterConfig::default(),
        }
    }

    /// Disambiguates the class name; zero or negative means no suffix.
    pub fn with_suffix(mut self, suffix: i64) -> Self {
        self.suffix = suffix;
        self
    }

    /// Replace the default context, which knows nothing about types of the
    /// class's package hiding `java.lang` names.
    pub fn with_name_context(mut self, context: NameContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_config(mut self, config: JUnitWriterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn class(&self) -> &ClassName {
        &self.class
    }

    pub fn blocks(&self) -> &'a [Block] {
        self.blocks
    }

    pub fn suffix(&self) -> i64 {
        self.suffix
    }

    /// `<Simple>Test<suffix>`, using the innermost name of member types.
    pub fn simple_test_name(&self) -> String {
        if self.suffix > 0 {
            format!("{}Test{}", self.class.simple_name(), self.suffix)
        } else {
            format!("{}Test", self.class.simple_name())
        }
    }

    /// Name shared by every tested operation, `None` when blocks test
    /// different operations or there are none.
    pub fn tested_method_name(&self) -> Option<&str> {
        let (first, rest) = self.blocks.split_first()?;
        let name = first.tested_name();
        rest.iter()
            .all(|block| block.tested_name() == name)
            .then_some(name)
    }

    pub fn header(&self) -> String {
        let config = &self.config;
        let base_class = if self.filtering {
            &config.filtering_base_class
        } else {
            &config.base_class
        };
        let mut builder = JavaSourceBuilder::from_config(config);

        builder.push_line(&format!(
            "public class {} extends {base_class} {{",
            self.simple_test_name()
        ));
        builder.indent();
        builder.push_line("");
        builder.push_line("/**");
        builder.push_line(" * Executed before each testXXX().");
        builder.push_line(" */");
        builder.push_line("protected void setUp() {");
        builder.indent();
        if self.filtering {
            if let Some(hook) = &config.reset_hook {
                builder.push_line("/* Re-initialize static fields of loaded classes. */");
                builder.push_line(hook);
            }
        }
        builder.push_line("//TODO: my setup code goes here.");
        builder.dedent();
        builder.push_line("}");
        builder.push_line("");
        builder.push_line("/**");
        builder.push_line(" * Executed after each testXXX().");
        builder.push_line(" */");
        builder.push_line("protected void tearDown() throws Exception {");
        builder.indent();
        builder.push_line("super.tearDown();");
        builder.push_line("//TODO: my tear down code goes here.");
        builder.dedent();
        builder.push_line("}");
        builder.build()
    }

    /// One `testN()` per block, each preceded by an empty line.
    pub fn test_cases(&self) -> String {
        let config = &self.config;
        let context = &self.context;
        let mut builder = JavaSourceBuilder::from_config(config);
        builder.indent();

        for (index, block) in self.blocks.iter().enumerate() {
            builder.push_newline();
            if self.filtering {
                builder.push_line(&format!("public void test{index}() throws Throwable {{"));
                builder.indent();
                let body = block_text(block, context, &builder.current_indent(), config);
                builder.push_line(&format!("try{body}"));
                builder.push_line("catch (Exception e) {dispatchException(e);}");
                builder.dedent();
                builder.push_line("}");
            } else {
                let body = block_text(block, context, &builder.current_indent(), config);
                builder.push_line(&format!("public void test{index}() throws Throwable {body}"));
            }
        }
        builder.build()
    }

    pub fn footer(&self) -> String {
        let name = self.simple_test_name();
        let mut builder = JavaSourceBuilder::from_config(&self.config);
        builder.indent();

        if self.filtering {
            if let Some(first) = self.blocks.first() {
                if self.tested_method_name().is_some() {
                    builder.push_line("protected String getNameOfTestedMeth() {");
                    builder.indent();
                    builder.push_line(&format!(
                        "return \"{}\";",
                        first.operation().qualified_name()
                    ));
                    builder.dedent();
                    builder.push_line("}");
                    builder.push_line("");
                }
            }
        }

        builder.push_line(&format!("public {name}(String pName) {{"));
        builder.indent();
        builder.push_line("super(pName);");
        builder.dedent();
        builder.push_line("}");
        builder.push_line("");
        builder.push_line("public static junit.framework.Test suite() {");
        builder.indent();
        builder.push_line(&format!("return new junit.framework.TestSuite({name}.class);"));
        builder.dedent();
        builder.push_line("}");
        builder.push_line("");
        builder.push_line("public static void main(String[] args) {");
        builder.indent();
        builder.push_line(&format!("junit.textui.TestRunner.run({name}.class);"));
        builder.dedent();
        builder.push_line("}");
        builder.build()
    }

    /// Header, test methods, footer and the closing brace.
    pub fn class_body(&self) -> String {
        let mut builder = JavaSourceBuilder::from_config(&self.config);
        builder.push(&self.header());
        builder.push(&self.test_cases());
        builder.indent();
        builder.push_line("");
        builder.dedent();
        builder.push(&self.footer());
        builder.push_line("}");
        builder.build()
    }

    pub fn source_file(&self) -> TestSourceFile {
        TestSourceFile {
            class_name: self.simple_test_name(),
            package: self.class.package().to_string(),
            comment: self.comment.clone(),
            class_body: self.class_body(),
        }
    }

    pub fn to_source(&self) -> String {
        self.source_file().to_source(&self.config)
    }
}

/// Complete source of the test class for `blocks` of `class`, with the
/// default writer configuration.
pub fn render_test_unit(class: &ClassName, blocks: &[Block], classify: bool, suffix: i64) -> String {
    TestCaseUnit::new(class.clone(), blocks, classify)
        .with_suffix(suffix)
        .to_source()
}
