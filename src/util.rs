use codespan_reporting::term::termcolor::{ColorSpec, WriteColor};
use core::{fmt, ops};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::io;
use std::sync::atomic::AtomicUsize;

#[allow(unused_macros)]
macro_rules! debug {
    ($fmt:literal) => {{
         out!(@DEBUG, "{}", $fmt);
    }};
    ($fmt:literal, $( $e:expr ),+ ) => {{
         out!(@DEBUG, $fmt, $( $e ),+ );
    }};
    ($expr:expr) => {{
         out!(@DEBUG, "{} = {:?}", stringify!($expr), $expr);
    }};
}

#[allow(unused_macros)]
macro_rules! out {
    (@DEBUG, $str:expr, $( $e:expr ),+ ) => {{
        if $crate::util::verbose() {
            out!(@NUMBERED, std::concat!("DEBUG ({}:{}): ", $str, "\n"), file!(), line!(), $( $e ),+ );
        }
    }};
    (@LOG, $str:expr, $( $e:expr ),+ ) => {{
        out!(@CLEAN, std::concat!("LOG ({}:{}): ", $str, "\n"), file!(), line!(), $( $e ),+ );
    }};
    (@NUMBERED, $str:expr, $( $e:expr ),+ ) => {{
        let count = $crate::util::COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        out!(@CLEAN, std::concat!("{:<3} ", $str), count, $( $e ),+ );
    }};
    (@CLEAN, $str:expr, $( $e:expr ),+ ) => {{
        let s = std::format!( $str, $( $e ),+ );
        $crate::util::emit_output(s);
    }};
}

thread_local! {
    pub static OUTPUT: RefCell<Option<Box<dyn Fn(String)>>> = RefCell::new(None);
    static VERBOSE: Cell<bool> = Cell::new(false);
}

pub static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Routes log lines on the current thread to `f` instead of stderr.
pub fn register_output(f: impl Fn(String) + 'static) {
    OUTPUT.with(|out| out.borrow_mut().replace(Box::new(f)));
}

/// Turns `debug!` output on or off for the current thread.
pub fn set_verbose(verbose: bool) {
    VERBOSE.with(|v| v.set(verbose));
}

pub fn verbose() -> bool {
    VERBOSE.with(|v| v.get())
}

pub fn emit_output(s: String) {
    OUTPUT.with(move |out| {
        let borrow = out.borrow();
        if let Some(func) = &*borrow {
            func(s);
        } else {
            std::eprint!("{}", s);
        }
    });
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

impl Range {
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "{}..{}", self.start, self.end)
    }
}

impl From<Range> for ops::Range<usize> {
    fn from(range: Range) -> Self {
        (range.start as usize)..(range.end as usize)
    }
}

#[inline]
pub fn r(start: u32, end: u32) -> Range {
    debug_assert!(start <= end);

    Range { start, end }
}

/// Range from the start of `range1` to the end of `range2`
#[inline]
pub fn r_from(range1: Range, range2: Range) -> Range {
    r(range1.start, range2.end)
}

pub struct StringWriter {
    buf: Vec<u8>,
}

impl StringWriter {
    pub fn new() -> StringWriter {
        StringWriter {
            buf: Vec::with_capacity(8 * 1024),
        }
    }

    pub fn into_string(self) -> String {
        match String::from_utf8(self.buf) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }

    pub fn to_string(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }
}

impl io::Write for StringWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl WriteColor for StringWriter {
    fn supports_color(&self) -> bool {
        false
    }

    fn set_color(&mut self, _color: &ColorSpec) -> io::Result<()> {
        return Ok(());
    }

    fn reset(&mut self) -> io::Result<()> {
        return Ok(());
    }
}
