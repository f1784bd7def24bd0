use pretty_assertions::assert_eq;
use shade_theme::{GrammarSet, ThemeMapping, TokenKind, VariableBuilder};

fn build(chunks: &[&str]) -> ThemeMapping {
    let grammars = GrammarSet::new();
    let mut builder = VariableBuilder::new();
    for chunk in chunks {
        builder.apply_all(&grammars.scan(chunk));
    }
    builder.finish()
}

#[test]
fn precedence_is_mix_light_dark_plain() {
    assert_eq!(
        TokenKind::PRECEDENCE,
        [
            TokenKind::Mix,
            TokenKind::Light,
            TokenKind::Dark,
            TokenKind::Plain
        ]
    );
}

#[test]
fn reserved_word_in_mix_falls_through_to_light() {
    let mapping = build(&["bg-light-blue-150"]);
    let keys: Vec<&str> = mapping.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["--color-light-blue-150", "--color-blue-150"]);
}

#[test]
fn literal_dedup_spans_chunks() {
    // the same literal in a second file contributes nothing new
    let once = build(&["ring-teal-red-250"]);
    let twice = build(&["ring-teal-red-250", "ring-teal-red-250"]);
    assert_eq!(once, twice);
}

#[test]
fn discovery_order_follows_chunks_then_rules() {
    let mapping = build(&["bg-blue-150", "text-dark-red-250 fill-lime-orange-350"]);
    let keys: Vec<&str> = mapping.iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        vec![
            "--color-blue-150",
            "--color-lime-orange-350",
            "--color-lime-350",
            "--color-orange-350",
            "--color-dark-red-250",
            "--color-red-250",
        ]
    );
}

#[test]
fn realistic_component_source() {
    let source = r#"
export function Badge({ tone }: Props) {
  return (
    <span className="inline-flex bg-emerald-150 text-emerald-900 ring-1 ring-emerald-350">
      <Icon className="fill-light-emerald-600 stroke-emerald-teal-425" />
    </span>
  );
}
"#;
    let mapping = build(&[source]);
    assert_eq!(
        mapping.iter().collect::<Vec<_>>(),
        vec![
            (
                "--color-emerald-teal-425",
                "color-mix(in oklab, var(--color-emerald-425) 50%, var(--color-teal-425))"
            ),
            (
                "--color-emerald-425",
                "color-mix(in oklab, var(--color-emerald-400) 25%, var(--color-emerald-500))"
            ),
            (
                "--color-teal-425",
                "color-mix(in oklab, var(--color-teal-400) 25%, var(--color-teal-500))"
            ),
            (
                "--color-light-emerald-600",
                "color-mix(in oklab, var(--color-emerald-600) 50%, var(--color-white))"
            ),
            (
                "--color-emerald-150",
                "color-mix(in oklab, var(--color-emerald-100) 50%, var(--color-emerald-200))"
            ),
            (
                "--color-emerald-350",
                "color-mix(in oklab, var(--color-emerald-300) 50%, var(--color-emerald-400))"
            ),
        ]
    );
}
