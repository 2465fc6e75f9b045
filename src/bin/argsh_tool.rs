//! Thin host-bridge adapter (spec §9 "the shell-embedded shim ... becomes a
//! thin adapter") exercising the library end to end against a sample
//! `usage`/`args` declaration. Exposes the external surface from spec §6:
//! a bare invocation drives the usage engine, `completion <shell>` and
//! `docgen <format>` drive the renderer.

use argsh::render::{completion, docgen, CommandPath, RenderContext};
use argsh::usage_engine::{parse_usage_entries, UsageEngine};
use argsh::{args_engine::parse_fields, Bindings, CoercerRegistry, Outcome, RenderConfig};

const SAMPLE_ARGS: &[&str] = &[
    "port|p:~int", "Port to listen on",
    "verbose|v:+", "Increase verbosity",
    "name", "Project name",
];

const SAMPLE_USAGE: &[&str] = &[
    "serve|s", "Start the HTTP server",
    "build|b", "Build the project",
    "#debug-info", "Print internal debug info",
];

fn program_name(argv0: &str) -> String {
    std::path::Path::new(argv0).file_name().and_then(|f| f.to_str()).unwrap_or("argsh-tool").to_string()
}

fn die(message: impl std::fmt::Display, code: i32) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let program = argv.first().map(|s| program_name(s)).unwrap_or_else(|| "argsh-tool".to_string());

    let bindings = Bindings::new(program.clone());
    let fields = parse_fields(SAMPLE_ARGS, &bindings, "args").unwrap_or_else(|e| {
        let code = e.exit_code();
        die(e, code)
    });
    let entries = parse_usage_entries(SAMPLE_USAGE, "usage").unwrap_or_else(|e| {
        let code = e.exit_code();
        die(e, code)
    });

    match argv.get(1).map(String::as_str) {
        Some("completion") => run_completion(&program, argv.get(2).map(String::as_str), &entries, &fields),
        Some("docgen") => run_docgen(&program, argv.get(2).map(String::as_str), argv.get(3).map(String::as_str), &fields),
        _ => run_dispatch(&program, &argv, bindings, &entries, &fields),
    }
}

fn run_completion(program: &str, shell: Option<&str>, entries: &[argsh::UsageEntry], fields: &[argsh::Field]) {
    let script = match shell {
        Some("bash") => completion::bash(program, entries, fields),
        Some("zsh") => completion::zsh(program, entries, fields),
        Some("fish") => completion::fish(program, entries, fields),
        _ => die(format!("usage: {} completion <bash|zsh|fish>", program), 2),
    };
    print!("{}", script);
}

fn run_docgen(program: &str, format: Option<&str>, sub: Option<&str>, fields: &[argsh::Field]) {
    let description = "Demonstration CLI driven by argsh field specs";
    match format {
        Some("man") => print!("{}", docgen::man(program, fields)),
        Some("md") => print!("{}", docgen::markdown(program, fields)),
        Some("rst") => print!("{}", docgen::rst(program, fields)),
        Some("yaml") => {
            let schema = docgen::build_tool_schema(program, description, fields);
            print!("{}", docgen::yaml(&schema).unwrap_or_else(|e| die(e, 2)));
        }
        Some("llm") => {
            let vendor = match sub {
                Some("openai") => docgen::LlmVendor::OpenAi,
                Some("anthropic") => docgen::LlmVendor::Anthropic,
                Some("gemini") => docgen::LlmVendor::Gemini,
                _ => die(format!("usage: {} docgen llm <openai|anthropic|gemini>", program), 2),
            };
            let schema = docgen::build_tool_schema(program, description, fields);
            let value = docgen::llm_tool_call(vendor, &schema);
            println!("{}", serde_json::to_string_pretty(&value).unwrap_or_else(|e| die(e, 2)));
        }
        _ => die(format!("usage: {} docgen <man|md|rst|yaml|llm>", program), 2),
    }
}

fn run_dispatch(program: &str, argv: &[String], mut bindings: Bindings, entries: &[argsh::UsageEntry], fields: &[argsh::Field]) {
    bindings.register_function("serve");
    bindings.register_function("build");

    let config = RenderConfig::from_env(program);
    let ctx = RenderContext::new(CommandPath::root(program.to_string()), config, argsh::supports_color());

    let coercers = CoercerRegistry::default();
    let engine = UsageEngine { title: "Demonstration CLI driven by argsh field specs", entries, global_fields: fields, coercers: &coercers, caller_prefix: None };

    let tail: Vec<String> = argv.iter().skip(1).cloned().collect();
    match engine.run(&tail, &mut bindings, &ctx) {
        Ok(Outcome::Help(text)) => print!("{}", text),
        Ok(Outcome::VersionBanner(text)) => print!("{}", text),
        Ok(Outcome::Dispatch { handler, tail }) => println!("dispatch -> {} {:?}", handler, tail),
        Ok(Outcome::Ok) => {}
        Err(e) => {
            let code = e.exit_code();
            die(e, code)
        }
    }
}
