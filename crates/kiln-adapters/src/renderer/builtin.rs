//! Built-in renderer for the Vite-based frameworks.

use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use kiln_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{Artifact, Framework, Linting, ProjectConfig, Stage, StateManagement, Styling, Testing},
    error::KilnResult,
};

use super::packages::{Packages, builtin_packages};
use super::sources::{self, component_dir, store_dir, styles_entry, uses_jsx};

/// Renders every write stage for React, Vue, Svelte, Solid, Preact and
/// vanilla projects. Meta frameworks are rejected: their plugins generate
/// them.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRenderer;

impl BuiltinRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for BuiltinRenderer {
    #[instrument(skip_all, fields(stage = %stage))]
    fn render(&self, config: &ProjectConfig, stage: Stage) -> KilnResult<Vec<Artifact>> {
        if config.framework().is_meta() {
            return Err(ApplicationError::Rendering {
                reason: format!(
                    "{} is generated by its own scaffolder",
                    config.framework().display_name()
                ),
            }
            .into());
        }

        let artifacts = match stage {
            Stage::Manifest => vec![Artifact::file("package.json", package_json(config)?)],
            Stage::BuildConfig => build_config(config),
            Stage::LanguageConfig => language_config(config)?,
            Stage::SourceTree => source_tree(config),
            Stage::EntryFiles => sources::entry_files(config),
            Stage::Styling => styling(config),
            Stage::Testing => testing(config),
            Stage::Linting => linting(config),
        };
        debug!(count = artifacts.len(), "Rendered stage");
        Ok(artifacts)
    }
}

// ── Manifest ──────────────────────────────────────────────────────────────────

fn object(entries: &[(String, String)]) -> Value {
    Value::Object(
        entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

pub(crate) fn to_pretty_json(value: &Value) -> KilnResult<String> {
    let mut out = serde_json::to_string_pretty(value).map_err(|e| ApplicationError::Rendering {
        reason: format!("cannot serialize JSON: {e}"),
    })?;
    out.push('\n');
    Ok(out)
}

fn package_json(config: &ProjectConfig) -> KilnResult<String> {
    let Packages {
        dependencies,
        dev_dependencies,
        scripts,
    } = builtin_packages(config);

    let mut root = Map::new();
    root.insert("name".into(), json!(config.project_name()));
    root.insert("private".into(), json!(true));
    root.insert("version".into(), json!("0.0.0"));
    root.insert("type".into(), json!("module"));
    root.insert("scripts".into(), object(&scripts));
    if !dependencies.is_empty() {
        root.insert("dependencies".into(), object(&dependencies));
    }
    root.insert("devDependencies".into(), object(&dev_dependencies));

    to_pretty_json(&Value::Object(root))
}

// ── Build config ──────────────────────────────────────────────────────────────

fn build_config(config: &ProjectConfig) -> Vec<Artifact> {
    let fw = config.framework();
    let ts = config.language().is_typescript();
    let mut imports = Vec::new();
    let mut plugins = Vec::new();

    if config.testing() == Testing::Vitest && ts {
        imports.push("/// <reference types=\"vitest/config\" />".to_string());
    }
    imports.push("import { defineConfig } from 'vite'".to_string());

    let (import, call) = match fw {
        Framework::React => ("import react from '@vitejs/plugin-react'", "react()"),
        Framework::Vue => ("import vue from '@vitejs/plugin-vue'", "vue()"),
        Framework::Svelte => (
            "import { svelte } from '@sveltejs/vite-plugin-svelte'",
            "svelte()",
        ),
        Framework::Solid => ("import solid from 'vite-plugin-solid'", "solid()"),
        Framework::Preact => ("import preact from '@preact/preset-vite'", "preact()"),
        _ => ("", ""),
    };
    if !import.is_empty() {
        imports.push(import.to_string());
        plugins.push(call);
    }
    if config.styling() == Styling::Tailwind {
        imports.push("import tailwindcss from '@tailwindcss/vite'".to_string());
        plugins.push("tailwindcss()");
    }

    let mut body = format!("  plugins: [{}],\n", plugins.join(", "));
    if config.testing() == Testing::Vitest {
        body.push_str("  test: {\n    environment: 'jsdom',\n  },\n");
    }

    let ext = config.language().extension();
    let mut files = vec![Artifact::file(
        format!("vite.config.{ext}"),
        format!(
            "{}\n\nexport default defineConfig({{\n{body}}})\n",
            imports.join("\n")
        ),
    )];

    if fw == Framework::Svelte {
        files.push(Artifact::file(
            "svelte.config.js",
            "import { vitePreprocess } from '@sveltejs/vite-plugin-svelte'\n\n\
             export default {\n  preprocess: vitePreprocess(),\n}\n",
        ));
    }
    files
}

// ── Language config ───────────────────────────────────────────────────────────

fn language_config(config: &ProjectConfig) -> KilnResult<Vec<Artifact>> {
    if !config.language().is_typescript() {
        return Ok(vec![]);
    }
    let fw = config.framework();

    let mut options = Map::new();
    options.insert("target".into(), json!("ES2022"));
    options.insert("useDefineForClassFields".into(), json!(true));
    options.insert("lib".into(), json!(["ES2022", "DOM", "DOM.Iterable"]));
    options.insert("module".into(), json!("ESNext"));
    options.insert("skipLibCheck".into(), json!(true));
    options.insert("moduleResolution".into(), json!("bundler"));
    options.insert("allowImportingTsExtensions".into(), json!(true));
    options.insert("isolatedModules".into(), json!(true));
    options.insert("moduleDetection".into(), json!("force"));
    options.insert("noEmit".into(), json!(true));
    match fw {
        Framework::React => {
            options.insert("jsx".into(), json!("react-jsx"));
        }
        Framework::Preact => {
            options.insert("jsx".into(), json!("react-jsx"));
            options.insert("jsxImportSource".into(), json!("preact"));
        }
        Framework::Solid => {
            options.insert("jsx".into(), json!("preserve"));
            options.insert("jsxImportSource".into(), json!("solid-js"));
        }
        _ => {}
    }
    options.insert("strict".into(), json!(true));
    options.insert("noUnusedLocals".into(), json!(true));
    options.insert("noUnusedParameters".into(), json!(true));
    options.insert("noFallthroughCasesInSwitch".into(), json!(true));

    let include = match fw {
        Framework::Vue => json!(["src/**/*.ts", "src/**/*.tsx", "src/**/*.vue"]),
        Framework::Svelte => json!(["src/**/*.ts", "src/**/*.js", "src/**/*.svelte"]),
        _ => json!(["src"]),
    };

    let mut root = Map::new();
    root.insert("compilerOptions".into(), Value::Object(options));
    root.insert("include".into(), include);

    Ok(vec![Artifact::file(
        "tsconfig.json",
        to_pretty_json(&Value::Object(root))?,
    )])
}

// ── Source tree ───────────────────────────────────────────────────────────────

fn source_tree(config: &ProjectConfig) -> Vec<Artifact> {
    let mut dirs = vec!["public", "src", "src/assets"];
    match config.structure() {
        kiln_core::domain::Structure::Flat => dirs.push("src/components"),
        kiln_core::domain::Structure::FeatureBased => {
            dirs.extend(["src/features", "src/shared", "src/shared/components"]);
        }
    }
    if config.state_management() != StateManagement::None {
        dirs.push(store_dir(config));
    }
    if config.data_fetching() != kiln_core::domain::DataFetching::None {
        dirs.push("src/api");
    }
    if config.routing() == kiln_core::domain::Routing::VueRouter {
        dirs.extend(["src/router", "src/views"]);
    }
    dirs.into_iter().map(Artifact::dir).collect()
}

// ── Styling ───────────────────────────────────────────────────────────────────

const BASE_CSS: &str = "\
:root {
  font-family: system-ui, Avenir, Helvetica, Arial, sans-serif;
  line-height: 1.5;
  color-scheme: light dark;
}

body {
  margin: 0;
  min-height: 100vh;
  display: grid;
  place-items: center;
}
";

fn styling(config: &ProjectConfig) -> Vec<Artifact> {
    let entry = format!("src/{}", styles_entry(config));
    match config.styling() {
        Styling::Css => vec![Artifact::file(entry, BASE_CSS)],
        Styling::CssModules => {
            let mut files = vec![Artifact::file(entry, BASE_CSS)];
            if uses_jsx(config.framework()) {
                files.push(Artifact::file(
                    format!("{}/Counter.module.css", component_dir(config)),
                    ".counter {\n  padding: 0.6em 1.2em;\n  border-radius: 8px;\n}\n",
                ));
            }
            files
        }
        Styling::Tailwind => vec![Artifact::file(entry, "@import \"tailwindcss\";\n")],
        Styling::Sass => vec![Artifact::file(
            entry,
            format!("$accent: #646cff;\n\n{BASE_CSS}\na {{\n  color: $accent;\n}}\n"),
        )],
    }
}

// ── Testing ───────────────────────────────────────────────────────────────────

const SANITY_TEST: &str = "\
describe('sanity', () => {
  it('adds numbers', () => {
    expect(1 + 1).toBe(2)
  })
})
";

fn testing(config: &ProjectConfig) -> Vec<Artifact> {
    let ext = config.language().extension();
    let ts = config.language().is_typescript();
    match config.testing() {
        Testing::None => vec![],
        Testing::Vitest => vec![Artifact::file(
            format!("src/sanity.test.{ext}"),
            format!("import {{ describe, expect, it }} from 'vitest'\n\n{SANITY_TEST}"),
        )],
        Testing::Jest => {
            let preset = if ts { "  preset: 'ts-jest',\n" } else { "" };
            vec![
                Artifact::file(
                    "jest.config.js",
                    format!("export default {{\n{preset}  testEnvironment: 'jsdom',\n}}\n"),
                ),
                Artifact::file(format!("src/sanity.test.{ext}"), SANITY_TEST),
            ]
        }
        Testing::Playwright => vec![
            Artifact::file(
                format!("playwright.config.{ext}"),
                "import { defineConfig } from '@playwright/test'\n\n\
                 export default defineConfig({\n  testDir: './e2e',\n  webServer: {\n    \
                 command: 'npm run dev',\n    url: 'http://localhost:5173',\n    \
                 reuseExistingServer: true,\n  },\n  use: {\n    baseURL: 'http://localhost:5173',\n  },\n})\n",
            ),
            Artifact::file(
                format!("e2e/home.spec.{ext}"),
                "import { expect, test } from '@playwright/test'\n\n\
                 test('home page renders', async ({ page }) => {\n  await page.goto('/')\n  \
                 await expect(page.locator('h1')).toBeVisible()\n})\n",
            ),
        ],
    }
}

// ── Linting ───────────────────────────────────────────────────────────────────

fn linting(config: &ProjectConfig) -> Vec<Artifact> {
    match config.linting() {
        Linting::None => vec![],
        Linting::Eslint => vec![Artifact::file("eslint.config.js", eslint_config(config))],
        Linting::Biome => vec![Artifact::file(
            "biome.json",
            "{\n  \"formatter\": {\n    \"indentStyle\": \"space\",\n    \"indentWidth\": 2\n  },\n  \
             \"linter\": {\n    \"rules\": {\n      \"recommended\": true\n    }\n  }\n}\n",
        )],
    }
}

fn eslint_config(config: &ProjectConfig) -> String {
    let ts = config.language().is_typescript();
    let mut imports = vec![
        "import js from '@eslint/js'".to_string(),
        "import globals from 'globals'".to_string(),
    ];
    let mut entries = vec![
        "  { ignores: ['dist'] },".to_string(),
        "  js.configs.recommended,".to_string(),
    ];
    if ts {
        imports.push("import tseslint from 'typescript-eslint'".into());
        entries.push("  ...tseslint.configs.recommended,".into());
    }
    match config.framework() {
        Framework::React | Framework::Preact => {
            imports.push("import reactHooks from 'eslint-plugin-react-hooks'".into());
            entries.push("  reactHooks.configs['recommended-latest'],".into());
        }
        Framework::Vue => {
            imports.push("import pluginVue from 'eslint-plugin-vue'".into());
            entries.push("  ...pluginVue.configs['flat/recommended'],".into());
        }
        Framework::Svelte => {
            imports.push("import svelte from 'eslint-plugin-svelte'".into());
            entries.push("  ...svelte.configs.recommended,".into());
        }
        Framework::Solid => {
            imports.push("import solid from 'eslint-plugin-solid/configs/recommended'".into());
            entries.push("  solid,".into());
        }
        _ => {}
    }
    entries.push("  { languageOptions: { globals: globals.browser } },".into());

    format!(
        "{}\n\nexport default [\n{}\n]\n",
        imports.join("\n"),
        entries.join("\n")
    )
}
