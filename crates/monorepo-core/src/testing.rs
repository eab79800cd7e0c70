//! Test utilities
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests. [`RecordingRunner`] stands in for the package managers and
//! framework generators: it records every invocation and lays down a minimal
//! version of what the real tool would have generated.

use crate::runtime::{CommandError, CommandRunner, Invocation};
use std::path::Path;
use std::sync::Mutex;

pub const ANGULAR_ROUTES: &str = "import { Routes } from '@angular/router';\n\nexport const routes: Routes = [];\n";

const VITE_REACT_FILES: &[(&str, &str)] = &[
    ("package.json", r#"{"name":"client","private":true,"scripts":{"dev":"vite"}}"#),
    ("index.html", "<div id=\"root\"></div>\n"),
    ("src/main.jsx", "import App from './App.jsx'\n"),
    ("src/App.jsx", "function App() { return <h1>Vite + React</h1> }\nexport default App\n"),
    ("src/App.css", "#root {}\n"),
];

const VUE_FILES: &[(&str, &str)] = &[
    ("package.json", r#"{"name":"client","private":true,"scripts":{"dev":"vite"}}"#),
    ("src/main.js", "import App from './App.vue'\n"),
    ("src/App.vue", "<template><HelloWorld /></template>\n"),
];

const ANGULAR_FILES: &[(&str, &str)] = &[
    ("package.json", r#"{"name":"client","scripts":{"start":"ng serve"}}"#),
    ("angular.json", "{}\n"),
    ("src/app/app.component.ts", "@Component({ selector: 'app-root' })\nexport class AppComponent {}\n"),
    ("src/app/app.component.html", "<router-outlet />\n"),
    ("src/app/app.config.ts", "export const appConfig = { providers: [provideClientHydration()] };\n"),
    ("src/app/app.routes.ts", ANGULAR_ROUTES),
];

const NEST_FILES: &[(&str, &str)] = &[
    (
        "package.json",
        r#"{"name":"server","version":"0.0.1","scripts":{"build":"nest build","start:dev":"nest start"}}"#,
    ),
    (
        "src/main.ts",
        "import { NestFactory } from '@nestjs/core';\nimport { AppModule } from './app.module';\n\nasync function bootstrap() {\n  const app = await NestFactory.create(AppModule);\n  await app.listen(process.env.PORT ?? 3000);\n}\nbootstrap();\n",
    ),
    ("src/app.controller.ts", "@Controller()\nexport class AppController {}\n"),
    ("src/app.service.ts", "@Injectable()\nexport class AppService {}\n"),
];

/// Fake [`CommandRunner`] that records calls and simulates generator output
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    failing: Option<String>,
    silent: bool,
    omitted: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit non-zero for every invocation of `program`
    pub fn failing(mut self, program: &str) -> Self {
        self.failing = Some(program.to_string());
        self
    }

    /// Succeed without producing any files
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    /// Leave `rel_path` out of whatever app the generator produces
    pub fn without_file(mut self, rel_path: &str) -> Self {
        self.omitted.push(rel_path.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn simulate(&self, invocation: &Invocation) -> std::io::Result<()> {
        if self.silent {
            return Ok(());
        }

        let cwd = &invocation.cwd;
        let args = invocation.args.join(" ");

        if invocation.args.first().map(String::as_str) == Some("init") {
            let name = cwd
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("project");
            let manifest = format!(
                "{{\n  \"name\": \"{}\",\n  \"version\": \"1.0.0\",\n  \"scripts\": {{\n    \"test\": \"exit 1\"\n  }}\n}}\n",
                name
            );
            return std::fs::write(cwd.join("package.json"), manifest);
        }

        let (dir, files) = if args.contains("vite@latest") {
            ("client", VITE_REACT_FILES)
        } else if args.contains("vue@latest") {
            ("client", VUE_FILES)
        } else if args.contains("@angular/cli") {
            ("client", ANGULAR_FILES)
        } else if args.contains("@nestjs/cli") {
            ("server", NEST_FILES)
        } else {
            return Ok(());
        };

        self.write_app(&cwd.join(dir), files)
    }

    fn write_app(&self, dir: &Path, files: &[(&str, &str)]) -> std::io::Result<()> {
        for (rel, content) in files {
            if self.omitted.iter().any(|o| o == rel) {
                continue;
            }
            let path = dir.join(rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        Ok(())
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<(), CommandError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(invocation.clone());

        if self.failing.as_deref() == Some(invocation.program.as_str()) {
            return Err(CommandError::Failed {
                command: invocation.to_string(),
                code: Some(1),
            });
        }

        self.simulate(invocation)
            .map_err(|source| CommandError::Spawn {
                command: invocation.to_string(),
                source,
            })
    }
}
