//! Pinned npm version ranges for every package kiln writes into a manifest.
//!
//! Shared by the built-in renderer and the meta-framework plugins so both
//! paths agree on what a selection installs.

/// `(package, range)` pairs, sorted by package name.
pub static VERSIONS: &[(&str, &str)] = &[
    ("@biomejs/biome", "^2.2.0"),
    ("@eslint/js", "^9.33.0"),
    ("@playwright/test", "^1.55.0"),
    ("@preact/preset-vite", "^2.10.2"),
    ("@reduxjs/toolkit", "^2.8.2"),
    ("@solidjs/testing-library", "^0.8.10"),
    ("@sveltejs/vite-plugin-svelte", "^6.1.3"),
    ("@tailwindcss/vite", "^4.1.12"),
    ("@tanstack/query-core", "^5.85.5"),
    ("@tanstack/react-query", "^5.85.5"),
    ("@tanstack/react-router", "^1.131.27"),
    ("@tanstack/solid-query", "^5.85.5"),
    ("@tanstack/solid-router", "^1.131.27"),
    ("@tanstack/svelte-query", "^5.85.5"),
    ("@tanstack/vue-query", "^5.85.5"),
    ("@testing-library/preact", "^3.2.4"),
    ("@testing-library/react", "^16.3.0"),
    ("@testing-library/svelte", "^5.2.8"),
    ("@testing-library/vue", "^8.1.0"),
    ("@types/jest", "^30.0.0"),
    ("@types/node", "^24.3.0"),
    ("@types/react", "^19.1.10"),
    ("@types/react-dom", "^19.1.7"),
    ("@vitejs/plugin-react", "^5.0.0"),
    ("@vitejs/plugin-vue", "^6.0.1"),
    ("eslint", "^9.33.0"),
    ("eslint-plugin-react-hooks", "^5.2.0"),
    ("eslint-plugin-solid", "^0.14.5"),
    ("eslint-plugin-svelte", "^3.11.0"),
    ("eslint-plugin-vue", "^10.4.0"),
    ("globals", "^16.3.0"),
    ("jest", "^30.0.5"),
    ("jest-environment-jsdom", "^30.0.5"),
    ("jotai", "^2.13.1"),
    ("jsdom", "^26.1.0"),
    ("pinia", "^3.0.3"),
    ("preact", "^10.27.1"),
    ("react", "^19.1.1"),
    ("react-dom", "^19.1.1"),
    ("react-redux", "^9.2.0"),
    ("react-router-dom", "^7.8.2"),
    ("sass", "^1.90.0"),
    ("solid-js", "^1.9.9"),
    ("svelte", "^5.38.2"),
    ("svelte-check", "^4.3.1"),
    ("swr", "^2.3.6"),
    ("tailwindcss", "^4.1.12"),
    ("ts-jest", "^29.4.1"),
    ("typescript", "~5.9.2"),
    ("typescript-eslint", "^8.40.0"),
    ("vite", "^7.1.3"),
    ("vite-plugin-solid", "^2.11.8"),
    ("vitest", "^3.2.4"),
    ("vue", "^3.5.19"),
    ("vue-router", "^4.5.1"),
    ("vue-tsc", "^3.0.6"),
    ("zustand", "^5.0.8"),
];

/// Version range for `package`; `"latest"` for anything not pinned.
pub fn version(package: &str) -> &'static str {
    VERSIONS
        .binary_search_by(|(name, _)| name.cmp(&package))
        .map(|i| VERSIONS[i].1)
        .unwrap_or("latest")
}
