//! The built-in tests run by `stdcheck`.

use stdcheck_core::{
    assert_output_eq, ceprintln, cprint, cprintln,
    testing::{read_stderr, read_stdout, Normalizer},
    TestRunner,
};

fn greet(name: &str) {
    cprintln!("Hello {}", name);
}

pub fn runner() -> TestRunner {
    TestRunner::new()
        .test("hello_world", || {
            print!("Hello world");
            assert_output_eq!(read_stdout(), "Hello world\n");
            Ok(())
        })
        .test("greeting_lines", || {
            for name in ["Alice", "Bob", "world"] {
                greet(name);
            }
            assert_output_eq!(
                read_stdout(),
                "Hello Alice\r\n  Hello Bob  \n\nHello world\n"
            );
            Ok(())
        })
        .test("stderr_is_separate", || {
            println!("result: 42");
            eprintln!("warning: approximated");
            assert_output_eq!(read_stderr(), "warning: approximated");
            assert_output_eq!(read_stdout(), "result: 42");
            Ok(())
        })
        .test("buffer_is_drained", || {
            ceprintln!("progress: 50%");
            cprintln!("first");
            assert_output_eq!(read_stdout(), "first");
            cprint!("second");
            assert_output_eq!(read_stdout(), "second");
            assert_output_eq!(read_stderr(), "progress: 50%");
            Ok(())
        })
        .test("strict_normalization", || {
            cprintln!("HELLO, World!");
            assert_output_eq!(read_stdout(), "hello, world", Normalizer::Strict);
            Ok(())
        })
}
