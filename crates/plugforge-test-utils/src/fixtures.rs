// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descriptor texts for tests.

/// Minimal descriptor: name and frameworks only, no callbacks.
pub fn minimal(name: &str, frameworks: &[&str]) -> String {
    let frameworks: Vec<String> = frameworks.iter().map(|f| format!("'{f}'")).collect();
    format!(
        "import type {{ Plugin }} from '../../types/index.js'\n\
         \n\
         export const plugin: Plugin = {{\n  \
           name: '{name}',\n  \
           frameworks: [{}],\n\
         }}\n",
        frameworks.join(", ")
    )
}

/// A full class-style descriptor with all three callbacks.
pub const ZUSTAND: &str = r#"import type { Plugin, ProjectContext, InstallResult, ConfigResult } from '../../types/index.js'
import { Category } from '../../types/index.js'
import { installPackages } from '../../utils/package-manager.js'
import { BackupManager } from '../../core/backup-manager.js'
import { ConfigWriter } from '../../core/config-writer.js'

export class ZustandPlugin implements Plugin {
  name = 'zustand'
  displayName = 'Zustand'
  description = 'Small, fast and scalable state management'

  metadata = {
    name: 'zustand',
    displayName: 'Zustand',
    description: 'Small, fast and scalable state management',
    category: Category.STATE,
    version: '^4.5.0',
    frameworks: ['react', 'nextjs'],
    incompatibleWith: ['redux', '@reduxjs/toolkit'],
    requires: [],
    recommends: ['immer'],
  }

  detect(ctx: ProjectContext): boolean {
    return ctx.dependencies['zustand'] !== undefined
  }

  async install(ctx: ProjectContext): Promise<InstallResult> {
    await installPackages(ctx, ['zustand@^4.5.0'])
    return { success: true, message: "installed {zustand}" }
  }

  async configure(ctx: ProjectContext): Promise<ConfigResult> {
    const backupManager = new BackupManager()
    const writer = new ConfigWriter(backupManager)
    const files = []
    await writer.writeFile(`${ctx.srcDir}/store/index.ts`, `export {}`)
    files.push({ path: 'src/store/index.ts', action: 'create' })
    return { files, success: true }
  }
}
"#;
