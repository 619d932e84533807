#![no_main]

use libfuzzer_sys::fuzz_target;
use modus::Engine;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut engine = Engine::new();

        let code = r#"
fact: (isa cube block)
fact: (size cube big)
rule: ((isa ?x block) (size ?x big)) -> (heavy ?x)
"#;

        if engine.add_code(code, "fuzz_queries").is_ok() {
            let _ = engine.ask_code(s);
            let _ = engine.explain_code(s);
            let _ = engine.retract_code(s);
        }
    }
});
