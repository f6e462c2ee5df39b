// Purpose - output formatting and hand-off of mixed frames

pub mod dac;

use self::dac::StereoFrame;

/// Consumer of mixed frames. Must not block: the caller is the sample tick.
pub trait FrameSink {
    /// Returns `false` when the frame was dropped.
    fn accept(&mut self, frame: StereoFrame) -> bool;
}

impl FrameSink for Vec<StereoFrame> {
    fn accept(&mut self, frame: StereoFrame) -> bool {
        self.push(frame);
        true
    }
}

#[cfg(feature = "rtrb")]
impl FrameSink for rtrb::Producer<StereoFrame> {
    fn accept(&mut self, frame: StereoFrame) -> bool {
        self.push(frame).is_ok()
    }
}
