use std::env;

// SIMD backends the accumulator types can be built on
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    target_feature: &'static str,
    target_arch: &'static [&'static str],
    cfg_flag: &'static str,
}

// Highest priority first
const FEATURES: &[CpuFeature] = &[
    CpuFeature {
        name: "avx2",
        target_feature: "avx",
        target_arch: &["x86", "x86_64"],
        cfg_flag: "avx2",
    },
    CpuFeature {
        name: "neon",
        target_feature: "neon",
        target_arch: &["aarch64"],
        cfg_flag: "neon",
    },
    CpuFeature {
        name: "sse2",
        target_feature: "sse2",
        target_arch: &["x86", "x86_64"],
        cfg_flag: "sse",
    },
];

impl CpuFeature {
    // Enabled for the compile target, i.e. usable by intrinsics without runtime dispatch
    fn enabled_for(&self, target_arch: &str, target_features: &[&str]) -> bool {
        self.target_arch.contains(&target_arch) && target_features.contains(&self.target_feature)
    }

    // aarch64 kernels report NEON as "asimd"
    fn listed_in(&self, cpuinfo: &str) -> bool {
        cpuinfo.contains(self.name) || (self.name == "neon" && cpuinfo.contains("asimd"))
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let target_features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let target_features: Vec<&str> = target_features.split(',').collect();

    // The backend is chosen from what the compile target enables, never from the
    // host: intrinsics compiled without the feature would not inline.
    let selected = FEATURES
        .iter()
        .position(|feature| feature.enabled_for(&target_arch, &target_features));

    // Native Linux builds only: hint when the host could use a better backend
    let native = env::var("HOST").ok() == env::var("TARGET").ok();
    if let (true, Ok(cpuinfo)) = (native, std::fs::read_to_string("/proc/cpuinfo")) {
        let cpuinfo = cpuinfo.to_lowercase();
        let better = FEATURES[..selected.unwrap_or(FEATURES.len())]
            .iter()
            .find(|feature| {
                feature.target_arch.contains(&target_arch.as_str()) && feature.listed_in(&cpuinfo)
            });
        if let Some(better) = better {
            println!(
                "cargo:warning=host CPU supports {} but it is not enabled for this target; \
                 build with RUSTFLAGS=\"-C target-cpu=native\" to use it",
                better.name
            );
        }
    }

    let cfg_flag = selected.map_or("fallback", |index| FEATURES[index].cfg_flag);
    println!("cargo:rustc-cfg={cfg_flag}");

    println!("cargo::rustc-check-cfg=cfg(avx2)");
    println!("cargo::rustc-check-cfg=cfg(sse)");
    println!("cargo::rustc-check-cfg=cfg(neon)");
    println!("cargo::rustc-check-cfg=cfg(fallback)");
}
