use super::*;
use crate::space::{RangeTable, TypeNode, ValueNode, mixed_radix, saturating_product};
use crasher_types::{
    ClassName, JavaType, NameContext, Operation, TypeCatalog, TypeEntry, Value, Visibility,
};
use std::cell::Cell;
use std::sync::Arc;

fn loadee() -> ClassName {
    ClassName::new("client.sub", "Loadee")
}

fn outer() -> ClassName {
    ClassName::new("client.sub", "Outer")
}

fn in_package() -> NameContext {
    NameContext::for_class(&loadee())
}

fn from_client() -> NameContext {
    NameContext::for_class(&ClassName::new("client", "Client"))
}

fn int_literal(value: i32) -> Expression {
    Expression::Literal(Literal::int(value))
}

/// `Loadee()`, `Loadee(int)`, `int size()`, `static Loadee parse(String)`,
/// plus a non-static member type `Outer$Inner`.
fn catalog() -> TypeCatalog {
    let loadee = loadee();
    let inner = outer().nested("Inner");
    let mut catalog = TypeCatalog::new();
    catalog
        .add_type(
            TypeEntry::new(loadee.clone())
                .with_operation(Operation::constructor(loadee.clone(), vec![]))
                .with_operation(Operation::constructor(loadee.clone(), vec![JavaType::int()]))
                .with_operation(Operation::method(loadee.clone(), "size", vec![], JavaType::int()))
                .with_operation(
                    Operation::method(
                        loadee.clone(),
                        "parse",
                        vec![JavaType::string()],
                        JavaType::class(loadee.clone()),
                    )
                    .with_static(true),
                ),
        )
        .expect("valid Loadee entry");
    catalog
        .add_type(
            TypeEntry::new(outer()).with_operation(Operation::constructor(outer(), vec![])),
        )
        .expect("valid Outer entry");
    catalog
        .add_type(
            TypeEntry::new(inner.clone())
                .with_inner(true)
                .with_operation(Operation::constructor(inner, vec![])),
        )
        .expect("valid Inner entry");
    catalog
}

fn size_method() -> Operation {
    Operation::method(loadee(), "size", vec![], JavaType::int())
}

/// Hands out fresh object handles and answers `size()` with 3.
struct StubInvoker {
    next_handle: Cell<u64>,
}

impl StubInvoker {
    fn new() -> Self {
        Self {
            next_handle: Cell::new(1),
        }
    }
}

impl Invoker for StubInvoker {
    fn invoke(
        &self,
        operation: &Operation,
        implicit: Option<Value>,
        _arguments: Vec<Value>,
    ) -> Result<Value, EvalError> {
        if operation.is_constructor() {
            let handle = self.next_handle.get();
            self.next_handle.set(handle + 1);
            return Ok(Value::Object {
                class: operation.declaring_type.clone(),
                handle,
            });
        }
        match implicit {
            Some(Value::Null) => Err(EvalError::Invocation {
                operation: operation.to_string(),
                failure: Failure::new(
                    ClassName::new("java.lang", "NullPointerException"),
                    "",
                ),
            }),
            _ => Ok(Value::Int(3)),
        }
    }
}

#[test]
fn one_dimensional_int_array_renders_and_evaluates() {
    let array = ArrayCreateAndInit::with_components(
        JavaType::array_of(JavaType::int()),
        vec![int_literal(0), int_literal(1), int_literal(2)],
    )
    .expect("int components");

    assert_eq!(array.text(&in_package()), "new int[]{0, 1, 2}");
    assert_eq!(array.leaf_type(), &JavaType::int());
    assert_eq!(array.dimensionality(), 1);

    let invoker = StubInvoker::new();
    let value = array.evaluate(&EvalContext::new(&invoker)).expect("evaluates");
    assert_eq!(
        value.elements(),
        Some(&[Value::Int(0), Value::Int(1), Value::Int(2)][..])
    );
}

#[test]
fn two_dimensional_int_array_nests_rows() {
    let row = ArrayCreateAndInit::with_components(
        JavaType::array_of(JavaType::int()),
        vec![int_literal(0), int_literal(1), int_literal(2)],
    )
    .expect("row");
    let matrix = ArrayCreateAndInit::with_components(
        JavaType::array_with_dimensions(JavaType::int(), 2),
        vec![Expression::Array(row.clone()), Expression::Array(row)],
    )
    .expect("matrix");

    assert_eq!(
        matrix.text(&in_package()),
        "new int[][]{new int[]{0, 1, 2}, new int[]{0, 1, 2}}"
    );
    assert_eq!(matrix.component_type(), JavaType::array_of(JavaType::int()));
}

#[test]
fn string_array_casts_null_components() {
    let array = ArrayCreateAndInit::with_components(
        JavaType::array_of(JavaType::string()),
        vec![
            Expression::Literal(Literal::null(JavaType::string()).expect("reference type")),
            Expression::Literal(Literal::string("")),
            Expression::Literal(Literal::string("hallo")),
        ],
    )
    .expect("string components");

    assert_eq!(
        array.text(&from_client()),
        r#"new String[]{(String)null, "", "hallo"}"#
    );
    assert_eq!(
        array.text(&NameContext::qualified()),
        r#"new java.lang.String[]{(java.lang.String)null, "", "hallo"}"#
    );
}

#[test]
fn array_leaf_names_follow_the_rendering_context() {
    let loadee_type = JavaType::class(loadee());
    let array = ArrayCreateAndInit::with_components(
        JavaType::array_of(loadee_type.clone()),
        vec![
            Expression::Literal(Literal::null(loadee_type.clone()).expect("reference type")),
            Expression::Call(
                OperationCall::new(Operation::constructor(loadee(), vec![]), None, vec![])
                    .expect("no arguments"),
            ),
        ],
    )
    .expect("components");

    assert_eq!(
        array.text(&from_client()),
        "new client.sub.Loadee[]{(client.sub.Loadee)null, new client.sub.Loadee()}"
    );
    assert_eq!(
        array.text(&in_package()),
        "new Loadee[]{(Loadee)null, new Loadee()}"
    );
}

#[test]
fn array_builder_rejects_invalid_shapes() {
    assert!(matches!(
        ArrayCreateAndInit::new(JavaType::int()),
        Err(PlanError::InvalidArgument { .. })
    ));
    assert!(matches!(
        ArrayCreateAndInit::from_leaf(JavaType::Void, 1),
        Err(PlanError::InvalidArgument { .. })
    ));
    assert!(matches!(
        ArrayCreateAndInit::with_components(
            JavaType::array_of(JavaType::int()),
            vec![Expression::Literal(Literal::string("x"))],
        ),
        Err(PlanError::InvalidArgument { .. })
    ));
}

#[test]
fn composite_sizes_partition_indices() {
    let table = RangeTable::new(vec![3, 5, 2]);
    assert_eq!(table.size(), 10);
    assert_eq!(table.range(1), 3..8);
    assert_eq!(table.locate(8), Ok((2, 0)));
    assert_eq!(table.locate(3), Ok((1, 0)));
    assert_eq!(
        table.locate(10),
        Err(PlanError::IndexOutOfRange { index: 10, size: 10 })
    );
}

#[test]
fn type_node_maps_indices_into_children() {
    let leaf = |values: Vec<i32>| {
        Arc::new(PlanSpace::Values(ValueNode::new(
            JavaType::int(),
            values.into_iter().map(int_literal).collect(),
        )))
    };
    let node = TypeNode::new(
        JavaType::int(),
        0,
        vec![leaf(vec![0, 1, 2]), leaf(vec![10, 11, 12, 13, 14]), leaf(vec![20, 21])],
    );

    assert_eq!(node.size(), 10);
    assert_eq!(node.plan_at(8), Ok(int_literal(20)));
    assert_eq!(node.plan_at(7), Ok(int_literal(14)));
    assert!(node.plan_at(10).is_err());
}

#[test]
fn sizes_saturate_instead_of_wrapping() {
    let table = RangeTable::new(vec![u64::MAX, 5]);
    assert!(table.is_saturated());
    assert_eq!(table.size(), u64::MAX);
    assert_eq!(saturating_product(&[u64::MAX, 2]), u64::MAX);
    assert_eq!(saturating_product(&[]), 1);
}

#[test]
fn last_slot_varies_fastest() {
    let sizes = [2, 3];
    let order: Vec<Vec<u64>> = (0..6).map(|index| mixed_radix(index, &sizes)).collect();
    assert_eq!(
        order,
        vec![
            vec![0, 0],
            vec![0, 1],
            vec![0, 2],
            vec![1, 0],
            vec![1, 1],
            vec![1, 2],
        ]
    );
}

#[test]
fn literals_render_in_java_syntax() {
    let context = NameContext::qualified();
    assert_eq!(Literal::long(5).text(&context), "5L");
    assert_eq!(Literal::byte(-1).text(&context), "(byte)-1");
    assert_eq!(Literal::short(7).text(&context), "(short)7");
    assert_eq!(Literal::char('\n').text(&context), r"'\n'");
    assert_eq!(Literal::char('\'').text(&context), r"'\''");
    assert_eq!(Literal::float(1.5).text(&context), "1.5f");
    assert_eq!(Literal::float(f32::NAN).text(&context), "Float.NaN");
    assert_eq!(Literal::double(0.0).text(&context), "0.0d");
    assert_eq!(
        Literal::double(f64::NEG_INFINITY).text(&context),
        "Double.NEGATIVE_INFINITY"
    );
    assert_eq!(
        Literal::string("say \"hi\"\n").text(&context),
        r#""say \"hi\"\n""#
    );
}

#[test]
fn null_literal_requires_a_reference_type() {
    assert!(Literal::null(JavaType::int()).is_err());
    let null = Literal::null(JavaType::class(loadee())).expect("reference type");
    assert!(null.is_null());
    assert_eq!(null.evaluate(), Value::Null);
}

#[test]
fn preset_values_respect_the_filter() {
    let texts = |ty: JavaType, filter: PlanFilter| -> Vec<String> {
        preset_values(&ty, filter)
            .iter()
            .map(|value| value.text(&in_package()))
            .collect()
    };

    assert_eq!(texts(JavaType::int(), PlanFilter::All), ["0", "1", "-1"]);
    assert_eq!(texts(JavaType::boolean(), PlanFilter::All), ["true", "false"]);
    assert_eq!(
        texts(JavaType::string(), PlanFilter::All),
        [r#""""#, r#""hallo""#, "(String)null"]
    );
    assert_eq!(
        texts(JavaType::string(), PlanFilter::NonNull),
        [r#""""#, r#""hallo""#]
    );
    assert!(texts(JavaType::class(loadee()), PlanFilter::NonNull).is_empty());
    assert_eq!(
        texts(JavaType::array_of(JavaType::int()), PlanFilter::All),
        ["new int[]{}", "(int[])null"]
    );
}

#[test]
fn operation_calls_render_in_their_syntactic_position() {
    let context = in_package();
    let receiver = Expression::Literal(Literal::null(JavaType::class(loadee())).expect("reference"));
    let call = OperationCall::new(size_method(), Some(receiver), vec![]).expect("receiver given");
    assert_eq!(call.text(&context), "((Loadee)null).size()");

    let parse = Operation::method(
        loadee(),
        "parse",
        vec![JavaType::string()],
        JavaType::class(loadee()),
    )
    .with_static(true);
    let call = OperationCall::new(
        parse,
        None,
        vec![Expression::Literal(Literal::string("x"))],
    )
    .expect("static call");
    assert_eq!(call.text(&context), r#"Loadee.parse("x")"#);
    assert_eq!(call.text(&from_client()), r#"client.sub.Loadee.parse("x")"#);
}

#[test]
fn operation_calls_check_their_arguments() {
    let constructor = Operation::constructor(loadee(), vec![JavaType::int()]);
    assert!(OperationCall::new(constructor.clone(), None, vec![]).is_err());
    assert!(
        OperationCall::new(
            constructor,
            None,
            vec![Expression::Literal(Literal::boolean(true))]
        )
        .is_err()
    );
    assert!(OperationCall::new(size_method(), None, vec![]).is_err());

    let ints = || {
        Expression::Array(ArrayCreateAndInit::new(JavaType::array_of(JavaType::int())).expect("int[]"))
    };
    let take_object = Operation::constructor(loadee(), vec![JavaType::object()]);
    assert!(OperationCall::new(take_object, None, vec![ints()]).is_ok());
    let take_string = Operation::constructor(loadee(), vec![JavaType::string()]);
    assert!(OperationCall::new(take_string, None, vec![ints()]).is_err());
}

#[test]
fn zero_argument_constructor_block_has_one_statement() {
    let block = build_block(&catalog(), Operation::constructor(loadee(), vec![]), vec![])
        .expect("no arguments needed");

    assert_eq!(block.len(), 1);
    assert_eq!(block.statement_texts(&in_package()), ["Loadee l1 = new Loadee();"]);
    assert_eq!(block.tested_name(), "<init>");
}

#[test]
fn blocks_bind_arguments_left_to_right() {
    let constructor = Operation::constructor(loadee(), vec![JavaType::int(), JavaType::string()]);
    let block = build_block(
        &catalog(),
        constructor,
        vec![int_literal(1), Expression::Literal(Literal::string("hallo"))],
    )
    .expect("arity matches");

    assert_eq!(
        block.statement_texts(&in_package()),
        [
            "int i1 = 1;",
            r#"String s2 = "hallo";"#,
            "Loadee l3 = new Loadee(i1, s2);",
        ]
    );
}

#[test]
fn instance_method_blocks_bind_the_receiver_first() {
    let receiver = Expression::Call(
        OperationCall::new(Operation::constructor(loadee(), vec![]), None, vec![]).expect("call"),
    );
    let block = build_block(&catalog(), size_method(), vec![receiver]).expect("receiver given");

    assert_eq!(
        block.statement_texts(&in_package()),
        ["Loadee l1 = new Loadee();", "l1.size();"]
    );
    assert_eq!(block.tested_name(), "size");
}

#[test]
fn inner_constructor_blocks_bind_the_enclosing_instance_first() {
    let inner = outer().nested("Inner");
    let enclosing = Expression::Call(
        OperationCall::new(Operation::constructor(outer(), vec![]), None, vec![]).expect("call"),
    );
    let block = build_block(&catalog(), Operation::constructor(inner, vec![]), vec![enclosing])
        .expect("enclosing instance given");

    assert_eq!(
        block.statement_texts(&in_package()),
        ["Outer o1 = new Outer();", "Outer.Inner i2 = o1.new Inner();"]
    );
}

#[test]
fn block_builder_rejects_arity_mismatch() {
    let result = build_block(&catalog(), size_method(), vec![]);
    assert!(matches!(result, Err(PlanError::InvalidArgument { .. })));

    let result = build_block(
        &catalog(),
        Operation::constructor(loadee(), vec![]),
        vec![int_literal(0)],
    );
    assert!(matches!(result, Err(PlanError::InvalidArgument { .. })));
}

#[test]
fn name_allocator_shares_one_counter() {
    let mut names = NameAllocator::new();
    assert_eq!(names.fresh(&JavaType::int()), "i1");
    assert_eq!(names.fresh(&JavaType::string()), "s2");
    assert_eq!(names.fresh(&JavaType::array_with_dimensions(JavaType::int(), 2)), "i3");
    assert_eq!(names.issued("i"), 2);
}

#[test]
fn blocks_execute_in_statement_order() {
    let receiver = Expression::Call(
        OperationCall::new(Operation::constructor(loadee(), vec![]), None, vec![]).expect("call"),
    );
    let block = build_block(&catalog(), size_method(), vec![receiver]).expect("block");
    assert_eq!(block.execute(&StubInvoker::new()), Ok(Value::Int(3)));

    let null_receiver =
        Expression::Literal(Literal::null(JavaType::class(loadee())).expect("reference"));
    let block = build_block(&catalog(), size_method(), vec![null_receiver]).expect("block");
    assert!(matches!(
        block.execute(&StubInvoker::new()),
        Err(EvalError::Invocation { .. })
    ));
}

#[test]
fn unbound_variables_fail_evaluation() {
    let invoker = StubInvoker::new();
    let variable = Expression::Variable(Variable::new("x9", JavaType::int()));
    assert_eq!(
        variable.evaluate(&EvalContext::new(&invoker)),
        Err(EvalError::UnboundVariable {
            name: "x9".to_string()
        })
    );
}

#[test]
fn array_type_spaces_offer_empty_null_and_single_element_arrays() {
    let catalog = catalog();
    let mut builder = PlanSpaceBuilder::new(&catalog, Visibility::Global);
    let space = builder.type_space(&JavaType::array_of(JavaType::int()), PlanFilter::All, 0);

    let texts: Vec<String> = (0..space.size())
        .map(|index| space.plan_at(index).expect("in range").to_string())
        .collect();
    assert_eq!(
        texts,
        [
            "new int[]{}",
            "(int[])null",
            "new int[]{0}",
            "new int[]{1}",
            "new int[]{-1}",
        ]
    );

    let matrix = builder.type_space(
        &JavaType::array_with_dimensions(JavaType::int(), 2),
        PlanFilter::NonNull,
        0,
    );
    assert_eq!(matrix.size(), 6);
    assert_eq!(
        matrix.plan_at(2).expect("in range").to_string(),
        "new int[][]{(int[])null}"
    );
}

#[test]
fn type_spaces_are_memoized() {
    let catalog = catalog();
    let mut builder = PlanSpaceBuilder::new(&catalog, Visibility::Global);
    let first = builder.type_space(&JavaType::class(loadee()), PlanFilter::All, 2);
    let cached = builder.cached_spaces();
    let second = builder.type_space(&JavaType::class(loadee()), PlanFilter::All, 2);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(builder.cached_spaces(), cached);
}

#[test]
fn exhausted_budget_yields_empty_class_spaces() {
    let catalog = catalog();
    let mut builder = PlanSpaceBuilder::new(&catalog, Visibility::Global);
    let space = builder.type_space(&JavaType::class(loadee()), PlanFilter::NonNull, 0);
    assert_eq!(space.size(), 0);
    assert!(builder.function_space(&size_method(), 0).is_err());
}

#[test]
fn class_under_test_sums_its_operations() {
    let catalog = catalog();
    let shallow =
        ClassUnderTest::new(&catalog, loadee(), 1, Visibility::Global, Visibility::Global)
            .expect("depth 1");
    // Loadee() + Loadee(int) x 3 ints; size() has no receiver and parse(String)
    // has 3 strings.
    assert_eq!(shallow.size(), 1 + 3 + 3);

    let deep = ClassUnderTest::new(&catalog, loadee(), 2, Visibility::Global, Visibility::Global)
        .expect("depth 2");
    let ranges: Vec<(String, std::ops::Range<u64>)> = deep
        .function_ranges()
        .into_iter()
        .map(|(operation, range)| (operation.to_string(), range))
        .collect();
    assert_eq!(ranges.len(), 4);
    assert_eq!(ranges[0].1, 0..1);
    assert_eq!(ranges[1].1, 1..4);
    assert_eq!(ranges[2].1.start, 4);
    assert_eq!(deep.size(), ranges[3].1.end);
}

#[test]
fn class_under_test_maps_indices_to_blocks() {
    let catalog = catalog();
    let class = ClassUnderTest::new(&catalog, loadee(), 2, Visibility::Global, Visibility::Global)
        .expect("depth 2");
    let context = in_package();

    assert_eq!(
        class.block_at(0).expect("first").statement_texts(&context),
        ["Loadee l1 = new Loadee();"]
    );
    assert_eq!(
        class.block_at(2).expect("third").statement_texts(&context),
        ["int i1 = 1;", "Loadee l2 = new Loadee(i1);"]
    );
    let size_start = class.function_ranges()[2].1.start;
    assert_eq!(
        class.block_at(size_start).expect("size()").statement_texts(&context),
        ["Loadee l1 = new Loadee();", "l1.size();"]
    );
    assert!(matches!(
        class.block_at(class.size()),
        Err(PlanError::IndexOutOfRange { .. })
    ));
}

#[test]
fn class_under_test_needs_a_positive_depth() {
    let catalog = catalog();
    assert!(
        ClassUnderTest::new(&catalog, loadee(), 0, Visibility::Global, Visibility::Global)
            .is_err()
    );
}

#[test]
fn rendering_is_pure() {
    let catalog = catalog();
    let class = ClassUnderTest::new(&catalog, loadee(), 2, Visibility::Global, Visibility::Global)
        .expect("depth 2");
    for index in 0..class.size() {
        let block = class.block_at(index).expect("in range");
        assert_eq!(
            block.statement_texts(&in_package()),
            block.statement_texts(&in_package())
        );
        assert_eq!(class.block_at(index).expect("in range"), block);
    }
}

#[test]
fn classification_separates_contract_failures_from_defects() {
    let operation = size_method()
        .with_declared_failures(vec![ClassName::new("java.io", "IOException")]);
    let raised = |package: &str, name: &str, frame: &str| EvalError::Invocation {
        operation: operation.to_string(),
        failure: Failure::new(ClassName::new(package, name), "boom").raised_in(frame),
    };

    assert_eq!(
        classify(&raised("java.io", "IOException", "java.io.File.open"), &operation),
        Verdict::Expected
    );
    assert_eq!(
        classify(
            &raised("java.lang", "IllegalArgumentException", "client.sub.Loadee.size"),
            &operation
        ),
        Verdict::Expected
    );
    assert_eq!(
        classify(
            &raised("java.lang", "IllegalArgumentException", "client.sub.Helper.check"),
            &operation
        ),
        Verdict::Unexpected
    );
    assert_eq!(
        classify(
            &raised("java.lang", "NullPointerException", "client.sub.Loadee.size"),
            &operation
        ),
        Verdict::Unexpected
    );
    assert_eq!(
        classify(
            &EvalError::Access {
                operation: operation.to_string()
            },
            &operation
        ),
        Verdict::Expected
    );
}

#[test]
fn select_indices_strides_evenly() {
    let select = |size, limit| select_indices(size, limit).expect("small selection");
    assert_eq!(select(5, 10), vec![0, 1, 2, 3, 4]);
    assert_eq!(select(10, 4), vec![0, 2, 5, 7]);
    assert_eq!(select(3, 0), vec![0, 1, 2]);
    assert_eq!(select(u64::MAX, 2), vec![0, u64::MAX / 2]);
    assert!(select(0, 3).is_empty());
}

#[test]
fn unlimited_selection_of_huge_spaces_is_rejected() {
    assert_eq!(selected_count(u64::MAX, 0), u64::MAX);
    assert_eq!(selected_count(u64::MAX, 500), 500);
    assert_eq!(selected_count(7, 500), 7);
    assert!(matches!(
        select_indices(u64::MAX, 0),
        Err(PlanError::InvalidArgument { .. })
    ));
    assert!(matches!(
        select_indices(u64::MAX, MAX_SELECTED_PLANS + 1),
        Err(PlanError::InvalidArgument { .. })
    ));
}

/// `p.A` with `static int[] make()` and `static void take(Object[])`.
fn object_array_catalog() -> (TypeCatalog, ClassName) {
    let a = ClassName::new("p", "A");
    let mut catalog = TypeCatalog::new();
    catalog
        .add_type(
            TypeEntry::new(a.clone())
                .with_operation(
                    Operation::method(
                        a.clone(),
                        "make",
                        vec![],
                        JavaType::array_of(JavaType::int()),
                    )
                    .with_static(true),
                )
                .with_operation(
                    Operation::method(
                        a.clone(),
                        "take",
                        vec![JavaType::array_of(JavaType::object())],
                        JavaType::Void,
                    )
                    .with_static(true),
                ),
        )
        .expect("valid A entry");
    (catalog, a)
}

#[test]
fn object_array_slots_accept_arrays_from_producers() {
    let (catalog, a) = object_array_catalog();
    let under_test = ClassUnderTest::new(&catalog, a, 2, Visibility::Global, Visibility::Global)
        .expect("depth 2");
    // make() + take(Object[]) over {empty, null, {null}, {make()}}.
    assert_eq!(under_test.size(), 5);

    let texts: Vec<Vec<String>> = (0..under_test.size())
        .map(|index| {
            under_test
                .block_at(index)
                .expect("every index has a block")
                .statement_texts(under_test.name_context())
        })
        .collect();
    assert!(
        texts[4]
            .iter()
            .any(|statement| statement.ends_with("= new Object[]{A.make()};"))
    );
}

#[test]
fn object_components_admit_any_reference() {
    let nested = ArrayCreateAndInit::new(JavaType::array_of(JavaType::int())).expect("int[]");
    let objects = ArrayCreateAndInit::with_components(
        JavaType::array_of(JavaType::object()),
        vec![
            Expression::Array(nested.clone()),
            Expression::Literal(Literal::string("")),
        ],
    )
    .expect("arrays and strings are objects");
    assert_eq!(objects.components().len(), 2);

    assert!(matches!(
        ArrayCreateAndInit::with_components(
            JavaType::array_with_dimensions(JavaType::object(), 2),
            vec![Expression::Array(nested)],
        ),
        Err(PlanError::InvalidArgument { .. })
    ));
}

#[test]
fn class_name_context_sees_package_shadowing() {
    let a = ClassName::new("p", "A");
    let mut catalog = TypeCatalog::new();
    catalog
        .add_type(TypeEntry::new(a.clone()).with_operation(Operation::method(
            a.clone(),
            "name",
            vec![],
            JavaType::string(),
        )))
        .expect("valid A entry");
    let plain = ClassUnderTest::new(&catalog, a.clone(), 1, Visibility::Global, Visibility::Global)
        .expect("depth 1");
    assert_eq!(JavaType::string().source_name(plain.name_context()), "String");

    catalog
        .add_type(TypeEntry::new(ClassName::new("p", "String")))
        .expect("valid p.String entry");
    let shadowed = ClassUnderTest::new(&catalog, a, 1, Visibility::Global, Visibility::Global)
        .expect("depth 1");
    assert_eq!(
        JavaType::string().source_name(shadowed.name_context()),
        "java.lang.String"
    );
}
