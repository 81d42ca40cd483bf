use typed_sexp::parse_source;
use typed_sexp::types::Infer;

const INPUT: &str = r#"
; render every element after incrementing it
(map (fn [x] (str (+ x 1))) [1 2 3])
"#;

fn main() -> anyhow::Result<()> {
    let mut forms = parse_source(INPUT).map_err(|err| anyhow::anyhow!(err.render(INPUT)))?;

    for form in &mut forms {
        let mut infer = Infer::new();
        let env = infer.standard_env();

        infer
            .infer(&env, form)
            .map_err(|err| anyhow::anyhow!(err.span().annotate(INPUT, &err.to_string())))?;
        println!("// sexp: {}", form.typed());

        let subst = infer
            .solve()
            .map_err(|err| anyhow::anyhow!(err.span().annotate(INPUT, &err.to_string())))?;
        println!("// subs:");
        print!("{subst}");

        subst.apply_to_node(form);
        println!("// fixed sexp: {}", form.typed());
    }

    Ok(())
}
