//! Integration tests for nuprune

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Command isolated from the user's config and package cache
    fn nuprune(sandbox: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("nuprune");
        cmd.env("NUPRUNE_CONFIG", sandbox.path().join("config.toml"))
            .env("NUGET_PACKAGES", sandbox.path().join("packages"))
            .env("CI", "true");
        cmd
    }

    struct Fixture {
        sandbox: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let sandbox = TempDir::new().unwrap();
            fs::create_dir_all(sandbox.path().join("work")).unwrap();
            fs::create_dir_all(sandbox.path().join("packages")).unwrap();
            Self { sandbox }
        }

        fn workspace(&self) -> PathBuf {
            self.sandbox.path().join("work")
        }

        fn manifest(&self, relative: &str, content: &str) {
            let path = self.sandbox.path().join("work").join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn cached(&self, id: &str, version: &str) {
            fs::create_dir_all(self.version_dir(id, version)).unwrap();
            fs::write(
                self.version_dir(id, version).join(format!("{id}.nuspec")),
                "<package />",
            )
            .unwrap();
        }

        fn version_dir(&self, id: &str, version: &str) -> PathBuf {
            self.sandbox.path().join("packages").join(id).join(version)
        }

        fn cmd(&self) -> Command {
            nuprune(&self.sandbox)
        }
    }

    const APP_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <PackageReference Include="Newtonsoft.Json" Version="13.0.1" />
  </ItemGroup>
</Project>"#;

    #[test]
    fn help_displays() {
        let sandbox = TempDir::new().unwrap();
        nuprune(&sandbox)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("NuGet package cache"));
    }

    #[test]
    fn version_displays() {
        let sandbox = TempDir::new().unwrap();
        nuprune(&sandbox)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("nuprune"));
    }

    #[test]
    fn dry_run_lists_unused_version() {
        let fx = Fixture::new();
        fx.manifest("src/App/App.csproj", APP_PROJECT);
        fx.cached("newtonsoft.json", "13.0.1");
        fx.cached("newtonsoft.json", "12.0.3");

        fx.cmd()
            .args(["prune", "--dry-run"])
            .arg(fx.workspace())
            .assert()
            .success()
            .stdout(predicate::str::contains("12.0.3"))
            .stdout(predicate::str::contains("13.0.1").not())
            .stdout(predicate::str::contains("nothing was deleted"));

        assert!(fx.version_dir("newtonsoft.json", "12.0.3").exists());
        assert!(fx.version_dir("newtonsoft.json", "13.0.1").exists());
    }

    #[test]
    fn packages_config_and_child_version_are_honored() {
        let fx = Fixture::new();
        fx.manifest(
            "legacy/packages.config",
            r#"<?xml version="1.0" encoding="utf-8"?>
<packages>
  <package id="NUnit" version="3.13.2" targetFramework="net48" />
</packages>"#,
        );
        fx.manifest(
            "lib/Lib.fsproj",
            r#"<Project>
  <ItemGroup>
    <PackageReference Include="FSharp.Core">
      <Version>6.0.0</Version>
    </PackageReference>
  </ItemGroup>
</Project>"#,
        );
        fx.cached("nunit", "3.13.2");
        fx.cached("fsharp.core", "6.0.0");

        fx.cmd()
            .args(["prune"])
            .arg(fx.workspace())
            .assert()
            .success()
            .stdout(predicate::str::contains("No unused package directories found."))
            .stdout(predicate::str::contains("[y/N]").not());
    }

    #[test]
    fn tools_directory_is_never_a_candidate() {
        let fx = Fixture::new();
        fx.manifest("App.csproj", APP_PROJECT);
        fx.cached("newtonsoft.json", "13.0.1");
        fx.cached(".tools", "dotnet-ef");

        fx.cmd()
            .args(["prune", "--yes"])
            .arg(fx.workspace())
            .assert()
            .success()
            .stdout(predicate::str::contains("No unused package directories found."));

        assert!(fx.version_dir(".tools", "dotnet-ef").exists());
    }

    #[test]
    fn declining_confirmation_deletes_nothing() {
        let fx = Fixture::new();
        fx.manifest("App.csproj", APP_PROJECT);
        fx.cached("serilog", "2.10.0");

        fx.cmd()
            .args(["prune"])
            .arg(fx.workspace())
            .write_stdin("n\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("[y/N]"))
            .stdout(predicate::str::contains("Cancelled, nothing was deleted."));

        assert!(fx.version_dir("serilog", "2.10.0").exists());
    }

    #[test]
    fn empty_input_declines() {
        let fx = Fixture::new();
        fx.cached("serilog", "2.10.0");

        fx.cmd()
            .args(["prune"])
            .arg(fx.workspace())
            .write_stdin("")
            .assert()
            .success()
            .stdout(predicate::str::contains("Cancelled"));

        assert!(fx.version_dir("serilog", "2.10.0").exists());
    }

    #[test]
    fn confirming_deletes_unused_versions_only() {
        let fx = Fixture::new();
        fx.manifest("App.csproj", APP_PROJECT);
        fx.cached("Newtonsoft.Json", "13.0.1");
        fx.cached("Newtonsoft.Json", "12.0.3");
        fx.cached("serilog", "2.10.0");

        fx.cmd()
            .args(["prune", "-j", "2"])
            .arg(fx.workspace())
            .write_stdin("Y\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Deleted"))
            .stdout(predicate::str::contains("deleted 2 directories"));

        assert!(fx.version_dir("Newtonsoft.Json", "13.0.1").exists());
        assert!(!fx.version_dir("Newtonsoft.Json", "12.0.3").exists());
        assert!(!fx.version_dir("serilog", "2.10.0").exists());
        // Package directories themselves are left in place
        assert!(fx.sandbox.path().join("packages").join("serilog").exists());
    }

    #[test]
    fn broken_manifest_does_not_stop_the_run() {
        let fx = Fixture::new();
        fx.manifest("Broken.csproj", "<Project><ItemGroup>");
        fx.manifest("App.csproj", APP_PROJECT);
        fx.cached("newtonsoft.json", "13.0.1");

        fx.cmd()
            .args(["prune", "--dry-run"])
            .arg(fx.workspace())
            .assert()
            .success()
            .stdout(predicate::str::contains("failed to parse"))
            .stdout(predicate::str::contains("No unused package directories found."))
            .stderr(predicate::str::contains("failed to parse").not());
    }

    #[test]
    fn preview_is_capped() {
        let fx = Fixture::new();
        for i in 0..25 {
            fx.cached(&format!("pkg{i:02}"), "1.0.0");
        }

        fx.cmd()
            .args(["prune", "--dry-run", "--preview", "20"])
            .arg(fx.workspace())
            .assert()
            .success()
            .stdout(predicate::str::contains("25 unused version directories"))
            .stdout(predicate::str::contains("pkg19"))
            .stdout(predicate::str::contains("pkg20").not())
            .stdout(predicate::str::contains("..."));
    }

    #[test]
    fn cache_flag_overrides_environment() {
        let fx = Fixture::new();
        let other = fx.sandbox.path().join("other-cache");
        fs::create_dir_all(other.join("serilog").join("2.10.0")).unwrap();

        fx.cmd()
            .args(["prune", "--dry-run", "--cache"])
            .arg(&other)
            .arg(fx.workspace())
            .assert()
            .success()
            .stdout(predicate::str::contains("other-cache"))
            .stdout(predicate::str::contains("2.10.0"));
    }

    #[test]
    fn missing_cache_fails() {
        let fx = Fixture::new();
        fs::remove_dir_all(fx.sandbox.path().join("packages")).unwrap();

        fx.cmd()
            .args(["prune", "--dry-run"])
            .arg(fx.workspace())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Package cache directory not found"))
            .stderr(predicate::str::contains("NUGET_PACKAGES"));
    }

    #[test]
    fn missing_workspace_fails() {
        let fx = Fixture::new();

        fx.cmd()
            .args(["prune", "--dry-run"])
            .arg(fx.sandbox.path().join("does-not-exist"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Workspace directory not found"));
    }

    #[test]
    fn scan_plain_lists_references() {
        let fx = Fixture::new();
        fx.manifest("App.csproj", APP_PROJECT);
        fx.manifest(
            "Other.csproj",
            r#"<Project><ItemGroup>
  <PackageReference Include="newtonsoft.json" Version="13.0.1" />
  <PackageReference Include="Serilog" Version="" />
</ItemGroup></Project>"#,
        );

        fx.cmd()
            .args(["scan", "--format", "plain"])
            .arg(fx.workspace())
            .assert()
            .success()
            .stdout(predicate::str::is_match("(?i)^newtonsoft\\.json/13\\.0\\.1\n$").unwrap());
    }

    #[test]
    fn scan_json_is_an_array() {
        let fx = Fixture::new();

        fx.cmd()
            .args(["scan", "--format", "json"])
            .arg(fx.workspace())
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn config_path() {
        let sandbox = TempDir::new().unwrap();
        nuprune(&sandbox)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let sandbox = TempDir::new().unwrap();
        nuprune(&sandbox)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("preview_limit = 20"));
    }

    #[test]
    fn config_init_writes_file() {
        let sandbox = TempDir::new().unwrap();
        nuprune(&sandbox)
            .args(["config", "init"])
            .assert()
            .success();
        assert!(sandbox.path().join("config.toml").exists());

        nuprune(&sandbox)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));
    }

    #[test]
    fn invalid_config_fails() {
        let sandbox = TempDir::new().unwrap();
        fs::write(sandbox.path().join("config.toml"), "[cache\npreview_limit = ").unwrap();

        nuprune(&sandbox)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}
