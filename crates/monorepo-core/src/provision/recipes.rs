//! Declarative per-framework provisioning table
//!
//! Each framework maps to one [`Recipe`]: where the app comes from and which patches
//! wire it to the demo endpoint.

use super::assets;
use super::patch::{FilePatch, Transform};
use crate::choice::{ClientFramework, PackageManager, ServerFramework};
use crate::runtime::Invocation;
use std::path::Path;

/// Placeholder in generator args replaced by the chosen package manager
pub const PM_PLACEHOLDER: &str = "{pm}";

/// Where an app's files come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppSource {
    /// A framework's official generator, run in the workspace root
    Generator {
        program: &'static str,
        args: &'static [&'static str],
    },

    /// A single entry script and its package.json, written directly
    HandWritten {
        entry_file: &'static str,
        entry: &'static str,
        dependencies: &'static [(&'static str, &'static str)],
    },
}

impl AppSource {
    /// The generator invocation, if this source needs one
    pub fn invocation(&self, pm: PackageManager, cwd: &Path) -> Option<Invocation> {
        match self {
            AppSource::Generator { program, args } => Some(
                Invocation::new(*program, cwd)
                    .args(args.iter().map(|a| a.replace(PM_PLACEHOLDER, pm.command()))),
            ),
            AppSource::HandWritten { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Directory name under `apps/` (also the generator's output name)
    pub app: &'static str,
    pub source: AppSource,
    pub patches: &'static [FilePatch],
}

const REACT_PATCHES: &[FilePatch] = &[FilePatch::overwrite("src/App.jsx", assets::REACT_APP)];

const VUE_PATCHES: &[FilePatch] = &[FilePatch::overwrite("src/App.vue", assets::VUE_APP)];

const ANGULAR_PATCHES: &[FilePatch] = &[
    FilePatch::overwrite("src/app/app.component.ts", assets::ANGULAR_COMPONENT),
    FilePatch::overwrite("src/app/app.component.html", assets::ANGULAR_TEMPLATE),
    FilePatch::overwrite("src/app/app.config.ts", assets::ANGULAR_CONFIG),
];

const NEST_PATCHES: &[FilePatch] = &[
    FilePatch {
        path: "src/main.ts",
        transform: Transform::InsertAfter {
            anchor: assets::NEST_CREATE_ANCHOR,
            insertion: assets::NEST_CORS_INSERTION,
            unless_contains: assets::NEST_ENABLE_CORS,
        },
    },
    FilePatch::overwrite("src/app.controller.ts", assets::NEST_CONTROLLER),
    FilePatch {
        path: "package.json",
        transform: Transform::SetScript {
            name: "start:dev",
            command: "nest start --watch",
        },
    },
];

pub fn client_recipe(framework: ClientFramework) -> Recipe {
    let source = match framework {
        ClientFramework::React => AppSource::Generator {
            program: "npm",
            args: &["create", "vite@latest", "client", "--", "--template", "react"],
        },
        ClientFramework::Vue => AppSource::Generator {
            program: "npm",
            args: &["create", "vue@latest", "client"],
        },
        ClientFramework::Angular => AppSource::Generator {
            program: "npx",
            args: &[
                "-p",
                "@angular/cli",
                "ng",
                "new",
                "client",
                "--directory=client",
                "--skip-install",
                "--ssr=true",
            ],
        },
    };
    let patches = match framework {
        ClientFramework::React => REACT_PATCHES,
        ClientFramework::Vue => VUE_PATCHES,
        ClientFramework::Angular => ANGULAR_PATCHES,
    };

    Recipe {
        app: "client",
        source,
        patches,
    }
}

pub fn server_recipe(framework: ServerFramework) -> Recipe {
    match framework {
        ServerFramework::Express => Recipe {
            app: "server",
            source: AppSource::HandWritten {
                entry_file: "index.js",
                entry: assets::EXPRESS_ENTRY,
                dependencies: &[("express", "^4.21.2"), ("cors", "^2.8.5")],
            },
            patches: &[],
        },
        ServerFramework::Koa => Recipe {
            app: "server",
            source: AppSource::HandWritten {
                entry_file: "index.js",
                entry: assets::KOA_ENTRY,
                dependencies: &[("koa", "^3.0.0"), ("@koa/cors", "5.0.0")],
            },
            patches: &[],
        },
        ServerFramework::NestJS => Recipe {
            app: "server",
            source: AppSource::Generator {
                program: "npx",
                args: &[
                    "@nestjs/cli",
                    "new",
                    "server",
                    "--skip-install",
                    "--directory=server",
                    "--package-manager={pm}",
                ],
            },
            patches: NEST_PATCHES,
        },
    }
}
