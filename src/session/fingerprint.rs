use crate::{
    foundation::math::Fnv1a64,
    interp::engine::ParamValue,
    lifecycle::manager::ResourceRef,
    session::state::RenderState,
    transition::scheduler::TransitionPhase,
};

/// 128-bit digest of render output, built from two independently seeded FNV-1a streams.
///
/// Covers everything a renderer would draw: stage, local progress, parameters, resident
/// stages and cross-fade phase. Resource handles are excluded; only their owning stages
/// count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct RenderFingerprint {
    /// High half.
    pub hi: u64,
    /// Low half.
    pub lo: u64,
}

impl std::fmt::Display for RenderFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

const SEED_LO: u64 = 0x9ae1_6a3b_2f90_404f;

struct Pair {
    a: Fnv1a64,
    b: Fnv1a64,
}

impl Pair {
    fn new() -> Self {
        Self {
            a: Fnv1a64::new_default(),
            b: Fnv1a64::new(SEED_LO),
        }
    }

    fn u8(&mut self, v: u8) {
        self.a.write_u8(v);
        self.b.write_u8(v);
    }

    fn u64(&mut self, v: u64) {
        self.a.write_u64(v);
        self.b.write_u64(v);
    }

    fn f64(&mut self, v: f64) {
        self.a.write_f64(v);
        self.b.write_f64(v);
    }

    fn str(&mut self, s: &str) {
        self.a.write_str(s);
        self.b.write_str(s);
    }

    fn finish(self) -> RenderFingerprint {
        RenderFingerprint {
            hi: self.a.finish(),
            lo: self.b.finish(),
        }
    }
}

/// Fingerprint one state.
pub fn fingerprint_state(state: &RenderState) -> RenderFingerprint {
    let mut h = Pair::new();
    write_state(&mut h, state);
    h.finish()
}

/// Fingerprint an ordered sequence of states, e.g. a full replay.
pub fn fingerprint_states<'a>(
    states: impl IntoIterator<Item = &'a RenderState>,
) -> RenderFingerprint {
    let mut h = Pair::new();
    let mut n = 0u64;
    for state in states {
        write_state(&mut h, state);
        n += 1;
    }
    h.u64(n);
    h.finish()
}

fn write_state(h: &mut Pair, state: &RenderState) {
    h.f64(state.progress().get());
    h.u64(state.stage_index() as u64);
    h.f64(state.local_progress());

    h.u64(state.params().len() as u64);
    for (name, value) in state.params().iter() {
        h.str(name);
        match value {
            ParamValue::Scalar(v) => {
                h.u8(0);
                h.f64(*v);
            }
            ParamValue::Vec2(v) => {
                h.u8(1);
                h.f64(v.x);
                h.f64(v.y);
            }
            ParamValue::Vec3(v) => {
                h.u8(2);
                h.f64(v.x);
                h.f64(v.y);
                h.f64(v.z);
            }
            ParamValue::Color(c) => {
                h.u8(3);
                for ch in [c.r, c.g, c.b, c.a] {
                    h.f64(ch);
                }
            }
        }
    }

    let resources = state.resources();
    h.u64(resources.current.stage as u64);
    write_optional_ref(h, resources.previous);

    match state.phase() {
        TransitionPhase::Steady => h.u8(0),
        TransitionPhase::CrossFade { from, to, mix } => {
            h.u8(1);
            h.u64(from as u64);
            h.u64(to as u64);
            h.f64(mix);
        }
    }
}

fn write_optional_ref(h: &mut Pair, r: Option<ResourceRef>) {
    match r {
        Some(r) => {
            h.u8(1);
            h.u64(r.stage as u64);
        }
        None => h.u8(0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/fingerprint.rs"]
mod tests;
