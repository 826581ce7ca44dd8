/// Fixed-delay FIFO of mono audio samples.
///
/// Starts pre-filled with `delay_frames` of silence, so every sample written
/// comes back out `delay_frames` reads later as long as the producer and the
/// consumer run at the same rate. Wrap in `Arc<parking_lot::Mutex<DelayLine>>`
/// to share between an input callback and an output callback.
///
/// Overflow: when the producer gets ahead, the oldest queued samples are
/// dropped so a write never blocks the audio thread. A single write larger
/// than the whole line keeps only its tail. Underrun reads silence.
#[derive(Debug)]
pub struct DelayLine {
    buffer: Vec<f32>,
    write_index: usize,
    read_index: usize,
    available: usize,
    capacity: usize,
    delay_frames: usize,
}

impl DelayLine {
    /// `headroom` is extra capacity on top of the delay to absorb callback jitter.
    pub fn new(delay_frames: usize, headroom: usize) -> Self {
        let capacity = (delay_frames + headroom).max(1);
        let mut line = Self {
            buffer: vec![0.0; capacity],
            write_index: 0,
            read_index: 0,
            available: 0,
            capacity,
            delay_frames,
        };
        line.reset();
        line
    }

    /// Build a line for `delay_secs` at `sample_rate` frames per second.
    pub fn for_duration(delay_secs: f64, headroom_secs: f64, sample_rate: u32) -> Self {
        let rate = f64::from(sample_rate);
        let delay_frames = (delay_secs.max(0.0) * rate).round() as usize;
        let headroom = (headroom_secs.max(0.0) * rate).round() as usize;
        Self::new(delay_frames, headroom)
    }

    /// Push captured samples, dropping the oldest queued ones on overflow.
    ///
    /// If `samples` is larger than capacity, only the last `capacity` samples are kept.
    pub fn write(&mut self, samples: &[f32]) {
        let samples = &samples[samples.len().saturating_sub(self.capacity)..];
        if samples.is_empty() {
            return;
        }

        let overflow = (self.available + samples.len()).saturating_sub(self.capacity);
        if overflow > 0 {
            self.read_index = (self.read_index + overflow) % self.capacity;
            self.available -= overflow;
        }

        // At most two contiguous copies: up to the end of the buffer, then the wrap.
        let first = samples.len().min(self.capacity - self.write_index);
        let (head, tail) = samples.split_at(first);
        self.buffer[self.write_index..self.write_index + first].copy_from_slice(head);
        self.buffer[..tail.len()].copy_from_slice(tail);

        self.write_index = (self.write_index + samples.len()) % self.capacity;
        self.available += samples.len();
    }

    /// Fill `out` with delayed samples, padding with silence on underrun.
    /// Returns how many samples came from the line.
    pub fn read_into(&mut self, out: &mut [f32]) -> usize {
        let to_read = out.len().min(self.available);
        for (i, slot) in out.iter_mut().take(to_read).enumerate() {
            *slot = self.buffer[(self.read_index + i) % self.capacity];
        }
        out[to_read..].fill(0.0);

        self.read_index = (self.read_index + to_read) % self.capacity;
        self.available -= to_read;
        to_read
    }

    /// Samples currently queued, including the initial silence.
    pub fn count(&self) -> usize {
        self.available
    }

    pub fn delay_frames(&self) -> usize {
        self.delay_frames
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop queued audio and re-arm the initial silence.
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.read_index = 0;
        self.available = self.delay_frames.min(self.capacity);
        self.write_index = self.available % self.capacity;
    }
}

/// Average interleaved multi-channel audio down to mono.
pub fn downmix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    let mut mono = Vec::with_capacity(samples.len() / channels.max(1));
    downmix_into(samples.iter().copied(), channels, &mut mono);
    mono
}

/// Downmix into `out`, replacing its contents. Reuses `out`'s allocation, so
/// an audio callback can call this without allocating once warmed up.
pub fn downmix_into<I>(samples: I, channels: usize, out: &mut Vec<f32>)
where
    I: IntoIterator<Item = f32>,
{
    out.clear();
    let channels = channels.max(1);
    let mut sum = 0.0;
    let mut count = 0;
    for sample in samples {
        sum += sample;
        count += 1;
        if count == channels {
            out.push(sum / channels as f32);
            sum = 0.0;
            count = 0;
        }
    }
    if count > 0 {
        out.push(sum / count as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn samples_come_back_after_the_delay() {
        let mut line = DelayLine::new(3, 4);
        line.write(&[1.0, 2.0]);

        let mut out = [9.0; 5];
        assert_eq!(line.read_into(&mut out), 5);
        assert_eq!(out, [0.0, 0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn zero_delay_is_passthrough() {
        let mut line = DelayLine::new(0, 8);
        line.write(&[0.5, -0.5]);

        let mut out = [0.0; 2];
        line.read_into(&mut out);
        assert_eq!(out, [0.5, -0.5]);
    }

    #[test]
    fn underrun_pads_with_silence() {
        let mut line = DelayLine::new(1, 4);
        line.write(&[7.0]);

        let mut out = [1.0; 4];
        assert_eq!(line.read_into(&mut out), 2);
        assert_eq!(out, [0.0, 7.0, 0.0, 0.0]);
        assert_eq!(line.count(), 0);
    }

    #[test]
    fn overflow_drops_oldest() {
        let mut line = DelayLine::new(2, 2);
        line.write(&[1.0, 2.0, 3.0]); // capacity 4: drops one leading silence sample

        let mut out = [0.0; 4];
        line.read_into(&mut out);
        assert_eq!(out, [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn write_larger_than_capacity_keeps_tail() {
        let mut line = DelayLine::new(1, 2);
        line.write(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        let mut out = [0.0; 3];
        line.read_into(&mut out);
        assert_eq!(out, [3.0, 4.0, 5.0]);
    }

    #[test]
    fn wraparound_preserves_order() {
        let mut line = DelayLine::new(0, 4);
        line.write(&[1.0, 2.0, 3.0]);
        let mut two = [0.0; 2];
        line.read_into(&mut two);

        line.write(&[4.0, 5.0, 6.0]);

        let mut out = [0.0; 4];
        line.read_into(&mut out);
        assert_eq!(out, [3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn reset_rearms_silence() {
        let mut line = DelayLine::new(2, 2);
        line.write(&[1.0, 2.0]);
        line.reset();

        assert_eq!(line.count(), 2);
        let mut out = [5.0; 2];
        line.read_into(&mut out);
        assert_eq!(out, [0.0, 0.0]);
    }

    #[test]
    fn for_duration_sizes_by_rate() {
        let line = DelayLine::for_duration(1.5, 0.5, 48_000);
        assert_eq!(line.delay_frames(), 72_000);
        assert_eq!(line.capacity(), 96_000);
        assert_eq!(line.count(), 72_000);
    }

    #[test]
    fn downmix_averages_frames() {
        let mono = downmix_to_mono(&[1.0, 0.0, 0.5, 0.5], 2);
        assert_eq!(mono.len(), 2);
        assert_relative_eq!(mono[0], 0.5);
        assert_relative_eq!(mono[1], 0.5);
        assert_eq!(downmix_to_mono(&[0.25, 0.75], 1), vec![0.25, 0.75]);
    }

    #[test]
    fn downmix_into_reuses_the_buffer() {
        let mut out = Vec::with_capacity(16);
        let ptr = out.as_ptr();

        downmix_into([1.0, 0.0, 0.5, 0.5, 1.0, 1.0], 2, &mut out);
        assert_eq!(out, vec![0.5, 0.5, 1.0]);

        downmix_into([0.0, 0.5, 1.0], 3, &mut out);
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0], 0.5);
        assert_eq!(out.as_ptr(), ptr);
    }

    #[test]
    fn downmix_averages_a_trailing_partial_frame() {
        assert_eq!(downmix_to_mono(&[1.0, 0.0, 0.25], 2), vec![0.5, 0.25]);
    }

    #[test]
    fn write_across_the_wrap_point() {
        let mut line = DelayLine::new(0, 4);
        line.write(&[1.0, 2.0, 3.0]);
        let mut three = [0.0; 3];
        line.read_into(&mut three);

        line.write(&[4.0, 5.0, 6.0, 7.0]);
        let mut out = [0.0; 4];
        assert_eq!(line.read_into(&mut out), 4);
        assert_eq!(out, [4.0, 5.0, 6.0, 7.0]);
    }
}
