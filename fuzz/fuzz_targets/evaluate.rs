#![no_main]
use libfuzzer_sys::fuzz_target;
use path_macros::{builtin, Arg, MacroSet, ParamFunc};

fuzz_target!(|data: (Vec<(String, Vec<String>)>, String)| {
    let mut macros = MacroSet::builtin();
    macros.insert(builtin::file());

    for m in &macros {
        let _ = m.evaluate(&data.1);
    }

    let funcs: Vec<ParamFunc> = data
        .0
        .iter()
        .map(|(name, args)| ParamFunc::new(name.as_str(), args.iter().map(|a| Arg::from_literal(a))))
        .collect();

    for m in &macros {
        if let Ok(matcher) = m.matcher(&funcs) {
            let _ = matcher.evaluate(&data.1);
        }
    }
});
