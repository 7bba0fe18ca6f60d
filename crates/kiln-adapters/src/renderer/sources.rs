//! Source file contents for the built-in frameworks.
//!
//! Everything here is plain string assembly. Placeholders of the form
//! `__NAME__` are filled by [`fill`]; JSX and template braces pass through
//! untouched.

use kiln_core::domain::{
    Artifact, DataFetching, Framework, Language, ProjectConfig, Routing, StateManagement,
    Structure, Styling,
};

use super::packages::query_package;

// ── Layout helpers ────────────────────────────────────────────────────────────

pub(super) fn component_dir(config: &ProjectConfig) -> &'static str {
    match config.structure() {
        Structure::Flat => "src/components",
        Structure::FeatureBased => "src/shared/components",
    }
}

pub(super) fn store_dir(config: &ProjectConfig) -> &'static str {
    match config.state_management() {
        StateManagement::Pinia => "src/stores",
        _ => "src/store",
    }
}

pub(super) fn styles_entry(config: &ProjectConfig) -> &'static str {
    match config.styling() {
        Styling::Sass => "index.scss",
        _ => "index.css",
    }
}

/// Whether components are written as JSX.
pub(super) fn uses_jsx(framework: Framework) -> bool {
    matches!(
        framework,
        Framework::React | Framework::Preact | Framework::Solid
    )
}

pub(super) fn main_file(config: &ProjectConfig) -> String {
    let ext = if uses_jsx(config.framework()) {
        config.language().jsx_extension()
    } else {
        config.language().extension()
    };
    format!("src/main.{ext}")
}

fn mount_id(framework: Framework) -> &'static str {
    match framework {
        Framework::React => "root",
        _ => "app",
    }
}

/// Import path of the component directory, relative to `src/`.
fn component_import(config: &ProjectConfig) -> &'static str {
    match config.structure() {
        Structure::Flat => "./components",
        Structure::FeatureBased => "./shared/components",
    }
}

fn fill(template: &str, name: &str) -> String {
    template.replace("__NAME__", name)
}

// ── Entry files ───────────────────────────────────────────────────────────────

/// Every file of the entry-files stage.
pub(super) fn entry_files(config: &ProjectConfig) -> Vec<Artifact> {
    let fw = config.framework();
    let lang = config.language();
    let ext = lang.extension();
    let jsx = lang.jsx_extension();
    let dir = component_dir(config);

    let mut files = vec![
        Artifact::file("index.html", index_html(config)),
        Artifact::file(main_file(config), main_source(config)),
    ];

    if lang.is_typescript() {
        let mut env = String::from("/// <reference types=\"vite/client\" />\n");
        if fw == Framework::Svelte {
            env.push_str("/// <reference types=\"svelte\" />\n");
        }
        files.push(Artifact::file("src/vite-env.d.ts", env));
    }

    match fw {
        Framework::React | Framework::Preact | Framework::Solid => {
            files.push(Artifact::file(format!("src/App.{jsx}"), jsx_app(config)));
            files.push(Artifact::file(format!("{dir}/Counter.{jsx}"), jsx_counter(config)));
        }
        Framework::Vue => {
            files.push(Artifact::file("src/App.vue", vue_app(config)));
            files.push(Artifact::file(format!("{dir}/Counter.vue"), vue_counter(lang)));
        }
        Framework::Svelte => {
            files.push(Artifact::file("src/App.svelte", svelte_app(config)));
            files.push(Artifact::file(format!("{dir}/Counter.svelte"), svelte_counter(lang)));
        }
        Framework::Vanilla => {
            files.push(Artifact::file(format!("{dir}/counter.{ext}"), vanilla_counter(lang)));
        }
        Framework::NextJs | Framework::Astro | Framework::SvelteKit => {}
    }

    match config.routing() {
        Routing::TanStackRouter => {
            files.push(Artifact::file(format!("src/router.{ext}"), tanstack_router(config)));
        }
        Routing::VueRouter => {
            files.push(Artifact::file(format!("src/router/index.{ext}"), VUE_ROUTER.to_string()));
            files.push(Artifact::file("src/views/HomeView.vue", vue_home_view(config)));
        }
        Routing::None | Routing::ReactRouter => {}
    }

    if let Some((file, source)) = store_source(config) {
        files.push(Artifact::file(format!("{}/{file}.{ext}", store_dir(config)), source));
    }

    match config.data_fetching() {
        DataFetching::None => {}
        DataFetching::TanStackQuery => files.push(Artifact::file(
            format!("src/api/queryClient.{ext}"),
            format!(
                "import {{ QueryClient }} from '{}'\n\nexport const queryClient = new QueryClient()\n",
                query_package(fw)
            ),
        )),
        DataFetching::Swr => {
            let param = if lang.is_typescript() { "url: string" } else { "url" };
            files.push(Artifact::file(
                format!("src/api/fetcher.{ext}"),
                format!("export const fetcher = ({param}) => fetch(url).then((res) => res.json())\n"),
            ));
        }
    }

    files.push(Artifact::file(".gitignore", GITIGNORE.to_string()));
    files.push(Artifact::file("README.md", readme(config)));
    files
}

fn index_html(config: &ProjectConfig) -> String {
    let main = main_file(config);
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{name}</title>
  </head>
  <body>
    <div id="{id}"></div>
    <script type="module" src="/{main}"></script>
  </body>
</html>
"#,
        name = config.project_name(),
        id = mount_id(config.framework()),
    )
}

/// A provider wrapped around the root component.
struct Wrapper {
    imports: Vec<String>,
    open: String,
    close: String,
}

fn wrappers(config: &ProjectConfig) -> Vec<Wrapper> {
    let fw = config.framework();
    let mut out = Vec::new();

    if config.routing() == Routing::ReactRouter {
        out.push(Wrapper {
            imports: vec!["import { BrowserRouter } from 'react-router-dom'".into()],
            open: "<BrowserRouter>".into(),
            close: "</BrowserRouter>".into(),
        });
    }
    if config.state_management() == StateManagement::Redux {
        out.push(Wrapper {
            imports: vec![
                "import { Provider } from 'react-redux'".into(),
                "import { store } from './store'".into(),
            ],
            open: "<Provider store={store}>".into(),
            close: "</Provider>".into(),
        });
    }
    if config.data_fetching() == DataFetching::TanStackQuery {
        out.push(Wrapper {
            imports: vec![
                format!("import {{ QueryClientProvider }} from '{}'", query_package(fw)),
                "import { queryClient } from './api/queryClient'".into(),
            ],
            open: "<QueryClientProvider client={queryClient}>".into(),
            close: "</QueryClientProvider>".into(),
        });
    }
    out
}

fn root_element(config: &ProjectConfig) -> (&'static str, Vec<String>) {
    if config.routing() == Routing::TanStackRouter {
        let pkg = if config.framework() == Framework::Solid {
            "@tanstack/solid-router"
        } else {
            "@tanstack/react-router"
        };
        (
            "<RouterProvider router={router} />",
            vec![
                format!("import {{ RouterProvider }} from '{pkg}'"),
                "import { router } from './router'".into(),
            ],
        )
    } else {
        ("<App />", vec!["import App from './App'".into()])
    }
}

fn nest(element: &str, wrappers: &[Wrapper], indent: usize) -> String {
    let mut out = String::new();
    for (depth, w) in wrappers.iter().enumerate() {
        out.push_str(&format!("{}{}\n", " ".repeat(indent + depth * 2), w.open));
    }
    out.push_str(&format!(
        "{}{}\n",
        " ".repeat(indent + wrappers.len() * 2),
        element
    ));
    for (depth, w) in wrappers.iter().enumerate().rev() {
        out.push_str(&format!("{}{}\n", " ".repeat(indent + depth * 2), w.close));
    }
    out
}

fn main_source(config: &ProjectConfig) -> String {
    let fw = config.framework();
    let ts = config.language().is_typescript();
    let bang = if ts { "!" } else { "" };
    let styles = styles_entry(config);

    match fw {
        Framework::React | Framework::Preact | Framework::Solid => {
            let wrappers = wrappers(config);
            let (element, root_imports) = root_element(config);

            let mut lines: Vec<String> = match fw {
                Framework::React => vec![
                    "import { StrictMode } from 'react'".into(),
                    "import { createRoot } from 'react-dom/client'".into(),
                ],
                Framework::Preact => vec!["import { render } from 'preact'".into()],
                _ => vec!["import { render } from 'solid-js/web'".into()],
            };
            lines.extend(wrappers.iter().flat_map(|w| w.imports.iter().cloned()));
            lines.extend(root_imports);
            lines.push(format!("import './{styles}'"));

            let mut out = lines.join("\n");
            out.push_str("\n\n");
            let id = mount_id(fw);
            match fw {
                Framework::React => {
                    out.push_str(&format!(
                        "createRoot(document.getElementById('{id}'){bang}).render(\n  <StrictMode>\n"
                    ));
                    out.push_str(&nest(element, &wrappers, 4));
                    out.push_str("  </StrictMode>,\n)\n");
                }
                Framework::Preact => {
                    out.push_str("render(\n");
                    out.push_str(&nest(element, &wrappers, 2));
                    out.push_str(&format!("  document.getElementById('{id}'){bang},\n)\n"));
                }
                _ => {
                    out.push_str("render(\n  () => (\n");
                    out.push_str(&nest(element, &wrappers, 4));
                    out.push_str(&format!("  ),\n  document.getElementById('{id}'){bang},\n)\n"));
                }
            }
            out
        }
        Framework::Vue => {
            let mut imports = vec!["import { createApp } from 'vue'".to_string()];
            let mut uses = Vec::new();
            if config.state_management() == StateManagement::Pinia {
                imports.push("import { createPinia } from 'pinia'".into());
                uses.push("app.use(createPinia())");
            }
            if config.routing() == Routing::VueRouter {
                imports.push("import router from './router'".into());
                uses.push("app.use(router)");
            }
            if config.data_fetching() == DataFetching::TanStackQuery {
                imports.push("import { VueQueryPlugin } from '@tanstack/vue-query'".into());
                imports.push("import { queryClient } from './api/queryClient'".into());
                uses.push("app.use(VueQueryPlugin, { queryClient })");
            }
            imports.push("import App from './App.vue'".into());
            imports.push(format!("import './{styles}'"));

            let mut out = imports.join("\n");
            out.push_str("\n\nconst app = createApp(App)\n");
            for line in uses {
                out.push_str(line);
                out.push('\n');
            }
            out.push_str("app.mount('#app')\n");
            out
        }
        Framework::Svelte => format!(
            "import {{ mount }} from 'svelte'\nimport App from './App.svelte'\nimport './{styles}'\n\n\
             const app = mount(App, {{ target: document.getElementById('app'){bang} }})\n\n\
             export default app\n"
        ),
        _ => {
            let (div, button) = if ts {
                ("<HTMLDivElement>", "<HTMLButtonElement>")
            } else {
                ("", "")
            };
            format!(
                "import './{styles}'\nimport {{ setupCounter }} from '{dir}/counter'\n\n\
                 document.querySelector{div}('#app'){bang}.innerHTML = `\n  <main>\n    <h1>{name}</h1>\n    \
                 <button id=\"counter\" type=\"button\"></button>\n  </main>\n`\n\n\
                 setupCounter(document.querySelector{button}('#counter'){bang})\n",
                dir = component_import(config),
                name = config.project_name(),
            )
        }
    }
}

fn jsx_app(config: &ProjectConfig) -> String {
    let dir = component_import(config);
    let mut out = format!("import Counter from '{dir}/Counter'\n");
    let body = if config.routing() == Routing::ReactRouter {
        out.push_str("import { Route, Routes } from 'react-router-dom'\n");
        "      <Routes>\n        <Route path=\"/\" element={<Counter />} />\n      </Routes>\n"
    } else {
        "      <Counter />\n"
    };
    out.push_str(&format!(
        "\nfunction App() {{\n  return (\n    <main>\n      <h1>{}</h1>\n{body}    </main>\n  )\n}}\n\nexport default App\n",
        config.project_name()
    ));
    out
}

fn jsx_counter(config: &ProjectConfig) -> String {
    let fw = config.framework();
    let modules = config.styling() == Styling::CssModules;
    let mut out = String::new();

    match fw {
        Framework::Solid => out.push_str("import { createSignal } from 'solid-js'\n"),
        Framework::Preact => out.push_str("import { useState } from 'preact/hooks'\n"),
        _ => out.push_str("import { useState } from 'react'\n"),
    }
    if modules {
        out.push_str("import styles from './Counter.module.css'\n");
    }

    let class = match (modules, fw) {
        (false, _) => "",
        (true, Framework::React) => " className={styles.counter}",
        (true, _) => " class={styles.counter}",
    };

    if fw == Framework::Solid {
        out.push_str(&format!(
            "\nfunction Counter() {{\n  const [count, setCount] = createSignal(0)\n\n  return (\n    \
             <button type=\"button\"{class} onClick={{() => setCount((c) => c + 1)}}>\n      \
             count is {{count()}}\n    </button>\n  )\n}}\n\nexport default Counter\n"
        ));
    } else {
        out.push_str(&format!(
            "\nfunction Counter() {{\n  const [count, setCount] = useState(0)\n\n  return (\n    \
             <button type=\"button\"{class} onClick={{() => setCount((c) => c + 1)}}>\n      \
             count is {{count}}\n    </button>\n  )\n}}\n\nexport default Counter\n"
        ));
    }
    out
}

fn script_open(lang: Language) -> &'static str {
    if lang.is_typescript() {
        "<script setup lang=\"ts\">"
    } else {
        "<script setup>"
    }
}

fn vue_app(config: &ProjectConfig) -> String {
    let name = config.project_name();
    let open = script_open(config.language());
    if config.routing() == Routing::VueRouter {
        return format!(
            "{open}\nimport {{ RouterView }} from 'vue-router'\n</script>\n\n<template>\n  <main>\n    \
             <h1>{name}</h1>\n    <RouterView />\n  </main>\n</template>\n"
        );
    }
    format!(
        "{open}\nimport Counter from '{dir}/Counter.vue'\n</script>\n\n<template>\n  <main>\n    \
         <h1>{name}</h1>\n    <Counter />\n  </main>\n</template>\n",
        dir = component_import(config),
    )
}

fn vue_home_view(config: &ProjectConfig) -> String {
    format!(
        "{open}\nimport Counter from '.{dir}/Counter.vue'\n</script>\n\n<template>\n  <Counter />\n</template>\n",
        open = script_open(config.language()),
        dir = component_import(config),
    )
}

fn vue_counter(lang: Language) -> String {
    format!(
        "{}\nimport {{ ref }} from 'vue'\n\nconst count = ref(0)\n</script>\n\n<template>\n  \
         <button type=\"button\" @click=\"count++\">count is {{{{ count }}}}</button>\n</template>\n",
        script_open(lang)
    )
}

const VUE_ROUTER: &str = "\
import { createRouter, createWebHistory } from 'vue-router'
import HomeView from '../views/HomeView.vue'

export default createRouter({
  history: createWebHistory(),
  routes: [{ path: '/', component: HomeView }],
})
";

fn svelte_app(config: &ProjectConfig) -> String {
    let lang = if config.language().is_typescript() { " lang=\"ts\"" } else { "" };
    let query = config.data_fetching() == DataFetching::TanStackQuery;
    let mut out = format!(
        "<script{lang}>\n  import Counter from '{}/Counter.svelte'\n",
        component_import(config)
    );
    if query {
        out.push_str("  import { QueryClientProvider } from '@tanstack/svelte-query'\n");
        out.push_str("  import { queryClient } from './api/queryClient'\n");
    }
    out.push_str(&format!("</script>\n\n<main>\n  <h1>{}</h1>\n", config.project_name()));
    if query {
        out.push_str("  <QueryClientProvider client={queryClient}>\n    <Counter />\n  </QueryClientProvider>\n");
    } else {
        out.push_str("  <Counter />\n");
    }
    out.push_str("</main>\n");
    out
}

fn svelte_counter(lang: Language) -> String {
    let lang = if lang.is_typescript() { " lang=\"ts\"" } else { "" };
    format!(
        "<script{lang}>\n  let count = $state(0)\n</script>\n\n\
         <button type=\"button\" onclick={{() => count++}}>count is {{count}}</button>\n"
    )
}

fn vanilla_counter(lang: Language) -> String {
    let (param, count) = if lang.is_typescript() {
        ("element: HTMLButtonElement", "count: number")
    } else {
        ("element", "count")
    };
    format!(
        "export function setupCounter({param}) {{\n  let counter = 0\n  const setCounter = ({count}) => {{\n    \
         counter = count\n    element.innerHTML = `count is ${{counter}}`\n  }}\n  \
         element.addEventListener('click', () => setCounter(counter + 1))\n  setCounter(0)\n}}\n"
    )
}

fn tanstack_router(config: &ProjectConfig) -> String {
    let pkg = if config.framework() == Framework::Solid {
        "@tanstack/solid-router"
    } else {
        "@tanstack/react-router"
    };
    let mut out = format!(
        "import {{ createRootRoute, createRoute, createRouter }} from '{pkg}'\nimport App from './App'\n\n\
         const rootRoute = createRootRoute()\n\n\
         const indexRoute = createRoute({{\n  getParentRoute: () => rootRoute,\n  path: '/',\n  component: App,\n}})\n\n\
         export const router = createRouter({{ routeTree: rootRoute.addChildren([indexRoute]) }})\n"
    );
    if config.language().is_typescript() {
        out.push_str(&format!(
            "\ndeclare module '{pkg}' {{\n  interface Register {{\n    router: typeof router\n  }}\n}}\n"
        ));
    }
    out
}

/// `(file stem, source)` of the store module, if a state library is chosen.
fn store_source(config: &ProjectConfig) -> Option<(&'static str, String)> {
    let ts = config.language().is_typescript();
    match config.state_management() {
        StateManagement::None => None,
        StateManagement::Zustand if config.framework() == Framework::Vanilla => Some((
            "counter",
            format!(
                "import {{ createStore }} from 'zustand/vanilla'\n{}\nexport const counterStore = createStore{}((set) => ({{\n  \
                 count: 0,\n  increment: () => set((state) => ({{ count: state.count + 1 }})),\n}}))\n",
                if ts { ZUSTAND_STATE_TYPE } else { "" },
                if ts { "<CounterState>()" } else { "" },
            ),
        )),
        StateManagement::Zustand => Some((
            "counter",
            format!(
                "import {{ create }} from 'zustand'\n{}\nexport const useCounterStore = create{}((set) => ({{\n  \
                 count: 0,\n  increment: () => set((state) => ({{ count: state.count + 1 }})),\n}}))\n",
                if ts { ZUSTAND_STATE_TYPE } else { "" },
                if ts { "<CounterState>()" } else { "" },
            ),
        )),
        StateManagement::Redux => {
            let mut src = String::from(REDUX_STORE);
            if ts {
                src.push_str(
                    "\nexport type RootState = ReturnType<typeof store.getState>\n\
                     export type AppDispatch = typeof store.dispatch\n",
                );
            }
            Some(("index", src))
        }
        StateManagement::Jotai => Some((
            "atoms",
            "import { atom } from 'jotai'\n\nexport const countAtom = atom(0)\n".to_string(),
        )),
        StateManagement::Pinia => Some(("counter", PINIA_STORE.to_string())),
    }
}

const ZUSTAND_STATE_TYPE: &str = "
interface CounterState {
  count: number
  increment: () => void
}
";

const REDUX_STORE: &str = "\
import { configureStore, createSlice } from '@reduxjs/toolkit'

const counterSlice = createSlice({
  name: 'counter',
  initialState: { value: 0 },
  reducers: {
    increment: (state) => {
      state.value += 1
    },
  },
})

export const { increment } = counterSlice.actions

export const store = configureStore({
  reducer: { counter: counterSlice.reducer },
})
";

const PINIA_STORE: &str = "\
import { defineStore } from 'pinia'
import { ref } from 'vue'

export const useCounterStore = defineStore('counter', () => {
  const count = ref(0)
  const increment = () => count.value++
  return { count, increment }
})
";

const GITIGNORE: &str = "\
node_modules
dist
dist-ssr
coverage
playwright-report
test-results
*.local
.DS_Store
";

fn readme(config: &ProjectConfig) -> String {
    let pm = config.package_manager();
    let mut out = fill(
        "# __NAME__\n\nGenerated by kiln.\n\n## Scripts\n\n",
        config.project_name(),
    );
    out.push_str(&format!("- `{} install`\n", pm.as_str()));
    for script in ["dev", "build", "preview"] {
        out.push_str(&format!("- `{}`\n", pm.run_script(script)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(fw: Framework) -> kiln_core::domain::ProjectConfigBuilder<kiln_core::domain::HasFramework> {
        ProjectConfig::builder("demo").framework(fw)
    }

    #[test]
    fn react_main_nests_providers_inside_strict_mode() {
        let c = config(Framework::React)
            .routing(Routing::ReactRouter)
            .data_fetching(DataFetching::TanStackQuery)
            .build()
            .unwrap();
        let main = main_source(&c);
        assert!(main.contains("document.getElementById('root')!"));
        let expected = "\
  <StrictMode>
    <BrowserRouter>
      <QueryClientProvider client={queryClient}>
        <App />
      </QueryClientProvider>
    </BrowserRouter>
  </StrictMode>,
";
        assert!(main.contains(expected), "{main}");
    }

    #[test]
    fn javascript_main_has_no_non_null_assertion() {
        let c = config(Framework::Preact)
            .language(Language::JavaScript)
            .build()
            .unwrap();
        assert!(!main_source(&c).contains(")!"));
        assert_eq!(main_file(&c), "src/main.jsx");
    }

    #[test]
    fn vue_main_installs_plugins() {
        let c = config(Framework::Vue)
            .state_management(StateManagement::Pinia)
            .routing(Routing::VueRouter)
            .build()
            .unwrap();
        let main = main_source(&c);
        assert!(main.contains("app.use(createPinia())\napp.use(router)\napp.mount('#app')"));
    }

    #[test]
    fn vue_counter_keeps_mustache_braces() {
        assert!(vue_counter(Language::TypeScript).contains("count is {{ count }}"));
    }

    #[test]
    fn feature_based_layout_moves_components() {
        let c = config(Framework::Svelte)
            .structure(Structure::FeatureBased)
            .build()
            .unwrap();
        let paths: Vec<String> = entry_files(&c).iter().map(|a| a.path().to_string()).collect();
        assert!(paths.contains(&"src/shared/components/Counter.svelte".to_string()));
        assert!(svelte_app(&c).contains("'./shared/components/Counter.svelte'"));
    }

    #[test]
    fn sass_changes_styles_import() {
        let c = config(Framework::Vanilla).styling(Styling::Sass).build().unwrap();
        assert!(main_source(&c).starts_with("import './index.scss'"));
    }
}
