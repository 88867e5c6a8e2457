use crate::test_utils::{assert_valid_query, ex, ex_namespace, var, TestResult};
use rdf_compose_model::{Literal, RdfTerm, TripleTerm};
use rdf_compose_sparql::ast::{
    ExpressionAst, NegatedPredicate, PropertyPathAst, TriplePatternAst,
};
use rdf_compose_sparql::builder::{AskBuilder, ConstructBuilder, DescribeBuilder, SelectBuilder};

#[test]
fn test_render_select_with_modifiers() -> TestResult {
    let query = SelectBuilder::new()
        .prefix("ex", ex_namespace())
        .distinct()
        .variable(var("s"))
        .variable(var("name"))
        .where_(|g| {
            g.triple(var("s"), ex("name"), var("name"))
                .optional(|o| o.triple(var("s"), ex("age"), var("age")))
                .filter(
                    ExpressionAst::var(var("age"))
                        .greater(ExpressionAst::term(Literal::from(18))),
                )
        })
        .order_by(var("name"))
        .limit(10)
        .offset(5)
        .build_query()
        .render();

    insta::assert_snapshot!(query.text(), @r#"
    PREFIX ex: <http://example.com/>
    SELECT DISTINCT ?s ?name
    WHERE {
      ?s ex:name ?name .
      OPTIONAL {
        ?s ex:age ?age .
      }
      FILTER (?age > "18"^^<http://www.w3.org/2001/XMLSchema#integer>)
    }
    ORDER BY ASC(?name)
    LIMIT 10
    OFFSET 5
    "#);
    assert_valid_query(query.text())
}

#[test]
fn test_render_union_chain() -> TestResult {
    let query = SelectBuilder::new()
        .where_(|g| {
            g.triple(var("s"), ex("p1"), var("o"))
                .union(|b| b.triple(var("s"), ex("p2"), var("o")))
                .union(|b| b.triple(var("s"), ex("p3"), var("o")))
        })
        .build_query()
        .render();

    insta::assert_snapshot!(query.text(), @r"
    SELECT *
    WHERE {
      {
        ?s <http://example.com/p1> ?o .
      } UNION {
        ?s <http://example.com/p2> ?o .
      } UNION {
        ?s <http://example.com/p3> ?o .
      }
    }
    ");
    assert_valid_query(query.text())
}

#[test]
fn test_render_minus_scopes_preceding_pattern() -> TestResult {
    let query = SelectBuilder::new()
        .prefix("ex", ex_namespace())
        .where_(|g| {
            g.triple(var("s"), ex("p1"), var("o"))
                .minus(|b| b.triple(var("s"), ex("p2"), var("o")))
        })
        .build_query()
        .render();

    insta::assert_snapshot!(query.text(), @r"
    PREFIX ex: <http://example.com/>
    SELECT *
    WHERE {
      {
        ?s ex:p1 ?o .
        MINUS {
          ?s ex:p2 ?o .
        }
      }
    }
    ");
    assert_valid_query(query.text())
}

#[test]
fn test_render_property_paths() -> TestResult {
    let a = || PropertyPathAst::predicate(ex("a"));
    let b = || PropertyPathAst::predicate(ex("b"));
    let query = SelectBuilder::new()
        .prefix("ex", ex_namespace())
        .where_(|g| {
            g.path(var("s"), a().then(b()).or(a().inverse()), var("o"))
                .path(var("s"), a().zero_or_more().then(b()), var("o"))
                .path(
                    var("s"),
                    PropertyPathAst::NegatedPropertySet(vec![
                        NegatedPredicate::Forward(ex("a")),
                        NegatedPredicate::Inverse(ex("b")),
                    ]),
                    var("o"),
                )
        })
        .build_query()
        .render();

    insta::assert_snapshot!(query.text(), @r"
    PREFIX ex: <http://example.com/>
    SELECT *
    WHERE {
      ?s (ex:a/ex:b)|(^ex:a) ?o .
      ?s (ex:a*)/ex:b ?o .
      ?s !(ex:a|^ex:b) ?o .
    }
    ");
    assert_valid_query(query.text())
}

#[test]
fn test_render_aggregates() -> TestResult {
    let query = SelectBuilder::new()
        .variable(var("s"))
        .expression(ExpressionAst::count_all(), var("count"))
        .where_(|g| g.triple(var("s"), var("p"), var("o")))
        .group_by(var("s"))
        .having(ExpressionAst::count_all().greater(ExpressionAst::term(Literal::from(1))))
        .build_query()
        .render();

    insta::assert_snapshot!(query.text(), @r#"
    SELECT ?s (COUNT(*) AS ?count)
    WHERE {
      ?s ?p ?o .
    }
    GROUP BY ?s
    HAVING (COUNT(*) > "1"^^<http://www.w3.org/2001/XMLSchema#integer>)
    "#);
    assert_valid_query(query.text())
}

#[test]
fn test_render_dataset_clauses_before_where() -> TestResult {
    let query = AskBuilder::new()
        .from(ex("g1"))
        .from_named(ex("g2"))
        .where_(|g| g.graph(var("g"), |b| b.triple(var("s"), var("p"), var("o"))))
        .build_query()
        .render();

    insta::assert_snapshot!(query.text(), @r"
    ASK
    FROM <http://example.com/g1>
    FROM NAMED <http://example.com/g2>
    WHERE {
      GRAPH ?g {
        ?s ?p ?o .
      }
    }
    ");
    assert_valid_query(query.text())
}

#[test]
fn test_render_ask_with_solution_modifiers() -> TestResult {
    let query = AskBuilder::new()
        .where_(|g| g.triple(var("s"), var("p"), var("o")))
        .order_by_desc(var("s"))
        .limit(1)
        .offset(2)
        .build_query()
        .render();

    insta::assert_snapshot!(query.text(), @r"
    ASK
    WHERE {
      ?s ?p ?o .
    }
    ORDER BY DESC(?s)
    LIMIT 1
    OFFSET 2
    ");
    assert_valid_query(query.text())
}

#[test]
fn test_render_escaped_literals_and_quoted_triples() -> TestResult {
    let label = RdfTerm::lang_string("say \"hi\"\n", "en")?;
    let query = ConstructBuilder::new()
        .prefix("ex", ex_namespace())
        .template(var("s"), ex("label"), var("l"))
        .where_(|g| {
            g.quoted_triple(
                TripleTerm::new(var("s"), ex("label"), var("l")),
                ex("source"),
                var("src"),
            )
            .values([var("l")], [vec![Some(label)], vec![None]])
        })
        .build_query()
        .render();

    insta::assert_snapshot!(query.text(), @r#"
    PREFIX ex: <http://example.com/>
    CONSTRUCT {
      ?s ex:label ?l .
    }
    WHERE {
      << ?s ex:label ?l >> ex:source ?src .
      VALUES (?l) {
        ("say \"hi\"\n"@en)
        (UNDEF)
      }
    }
    "#);
    assert_valid_query(query.text())
}

#[test]
fn test_render_describe_without_where() -> TestResult {
    let query = DescribeBuilder::new().target(ex("alice")).build_query().render();

    assert_eq!(query.text(), "DESCRIBE <http://example.com/alice>");
    assert_valid_query(query.text())
}

#[test]
fn test_render_not_exists() -> TestResult {
    let query = SelectBuilder::new()
        .variable(var("s"))
        .where_(|g| {
            let missing = TriplePatternAst::new(var("o"), ex("q"), var("x"));
            g.triple(var("s"), ex("p"), var("o"))
                .filter(ExpressionAst::NotExists(Box::new(missing.into())))
        })
        .build_query()
        .render();

    insta::assert_snapshot!(query.text(), @r"
    SELECT ?s
    WHERE {
      ?s <http://example.com/p> ?o .
      FILTER NOT EXISTS {
        ?o <http://example.com/q> ?x .
      }
    }
    ");
    assert_valid_query(query.text())
}

#[test]
fn test_render_is_deterministic() {
    let build = || {
        SelectBuilder::new()
            .prefix("ex", ex_namespace())
            .variable(var("s"))
            .where_(|g| g.triple(var("s"), ex("p"), var("o")))
            .build_query()
    };
    let ast = build();

    assert_eq!(ast.render(), ast.render());
    assert_eq!(ast.render(), build().render());
    assert_eq!(ast.clone().render().text(), ast.to_string());
}
