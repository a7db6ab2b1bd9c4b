use crate::driver::BeepSink;

pub struct Rodio {
    // Output audio source; kept alive for as long as the sink plays.
    _stream: rodio::OutputStream,
    sink: rodio::Sink,
}

impl Rodio {
    pub fn new() -> Self {
        use rodio::Source;

        let (stream, handle) = rodio::OutputStream::try_default().expect("no audio output device");
        let sink = rodio::Sink::try_new(&handle).expect("failed to create audio sink");

        // TODO: rodio only provides sine wave synthesis; a square wave would
        // sound closer to the original COSMAC VIP beep.
        let source = rodio::source::SineWave::new(349.23).amplify(0.1);
        sink.append(source);
        sink.pause();

        Rodio {
            _stream: stream,
            sink,
        }
    }
}

impl BeepSink for Rodio {
    fn beep_request(&mut self, active: bool) {
        if active {
            self.sink.play();
        } else {
            self.sink.pause();
        }
    }
}
