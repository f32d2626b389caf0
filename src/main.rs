use std::io;

fn main() -> io::Result<()> {
    h8dis::cli::main()
}
