use srparse::{Action, Driver, Grammar, ParsingTable, Symbol};
use srparse_gen::construct::Automaton;
use srparse_gen::{build_table, text, Method};

const EXPR: &str = include_str!("../grammars/expr.g");
const ASSIGN: &str = include_str!("../grammars/assign.g");

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn expression_file_matches_builtin_grammar() {
    init_logger();
    assert_eq!(text::read_grammar(EXPR).unwrap(), Grammar::expression());
}

#[test]
fn built_tables_parse_like_the_builtin_one() {
    let grammar = text::read_grammar(EXPR).unwrap();
    let builtin = ParsingTable::expression(&grammar).unwrap();
    let slr = build_table(&grammar, Method::Slr).unwrap();
    let lr1 = build_table(&grammar, Method::Lr1).unwrap();
    assert_eq!(slr.state_count(), 12);
    assert_eq!(lr1.state_count(), 22);

    for source in ["id+id*id$", "(id)", "id*(id+id)*id", "id+", "()", "id id"] {
        let input = text::read_input(source).unwrap();
        let want = Driver::new(&grammar, &builtin).run(&input).unwrap();
        for table in [&slr, &lr1] {
            let got = Driver::new(&grammar, table).run(&input).unwrap();
            assert_eq!(got.is_accepted(), want.is_accepted(), "{source}");
            if want.is_accepted() {
                assert_eq!(got.trace().reductions(), want.trace().reductions(), "{source}");
            }
            assert_eq!(
                got.diagnostic().map(|d| (d.position, d.lookahead)),
                want.diagnostic().map(|d| (d.position, d.lookahead)),
                "{source}"
            );
        }
    }
}

#[test]
fn saved_tables_load_back() {
    let grammar = text::read_grammar(ASSIGN).unwrap();
    let table = build_table(&grammar, Method::Lr1).unwrap();
    let mut saved = Vec::new();
    text::write_table(&mut saved, &table).unwrap();
    let loaded = text::read_table(&grammar, &String::from_utf8(saved).unwrap()).unwrap();
    assert_eq!(loaded, table);

    let input = text::read_input("*id+id").unwrap();
    let outcome = Driver::new(&grammar, &loaded).run(&input).unwrap();
    assert!(outcome.is_accepted());
    assert_eq!(outcome.trace().last_action(), Some(Action::Accept));
}

#[test]
fn slr_conflicts_are_listed() {
    let grammar = text::read_grammar(ASSIGN).unwrap();
    let automaton = Automaton::build(&grammar, Method::Slr);
    let conflicts = automaton.conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].symbol, Symbol::Plus);
    assert_eq!(conflicts[0].kind(), "shift/reduce");
}

#[test]
fn every_built_table_is_valid_for_its_grammar() {
    for source in [EXPR, ASSIGN, "E -> T + E | T\nT -> id | ( E )\n"] {
        let grammar = text::read_grammar(source).unwrap();
        let table = build_table(&grammar, Method::Lr1).unwrap();
        let rebuilt = ParsingTable::new(&grammar, table.action_cells(), table.goto_cells());
        assert_eq!(rebuilt.unwrap(), table);
    }
}
